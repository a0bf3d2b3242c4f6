//! Mock mirror -> library -> pool -> accumulator -> sink.

use bop_assemble::{FixedStart, Generator, PoolBuilder, RandomStart};
use bop_library::{CATALOG, RandomShelf, find_book};
use bop_measure::{TokenCount, TokenCounter, WordCounter};
use bop_sinks::{Destination, deliver, format_summary};
use bop_types::{MeasureMode, TargetBudget, char_len, parse_size};

use crate::common::{library, mount_book, start_mirror};

#[tokio::test]
async fn generated_file_never_exceeds_target() {
    let server = start_mirror(40).await;
    let cache = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let library = library(&server, cache.path());

    let size = parse_size("2k").unwrap();
    let budget = TargetBudget::new(size, MeasureMode::Chars).unwrap();
    let mut shelf = RandomShelf::new(&library);

    let generated = Generator::new(WordCounter)
        .generate(&mut shelf, budget, &mut RandomStart)
        .await
        .unwrap();

    let path = out.path().join("bop-output.txt");
    deliver(&generated.text, &Destination::File(path.clone())).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();

    assert_eq!(written, generated.text);
    assert!(char_len(&written) <= 2_000);
    // Pool holds at least 2,400 chars, so the walk stops on overflow, not exhaustion.
    assert!(char_len(&written) > 1_800, "{}", char_len(&written));
    assert!(!written.contains("PROJECT GUTENBERG"));
    assert!(written.ends_with("\n\n"));
}

#[tokio::test]
async fn single_book_output_is_deterministic_with_fixed_start() {
    let server = wiremock::MockServer::start().await;
    let book = find_book("frankenstein").unwrap();
    mount_book(&server, book, 50, 1).await;

    let cache = tempfile::tempdir().unwrap();
    let library = library(&server, cache.path());
    let books = [*book];
    let budget = TargetBudget::new(300, MeasureMode::Chars).unwrap();
    let generator = Generator::new(WordCounter);

    let first = generator
        .generate(&mut RandomShelf::with_books(&library, &books), budget, &mut FixedStart(10))
        .await
        .unwrap();
    let second = generator
        .generate(&mut RandomShelf::with_books(&library, &books), budget, &mut FixedStart(10))
        .await
        .unwrap();

    assert_eq!(first, second);
    assert!(first.text.starts_with("frankenstein paragraph 10: "));
    assert_eq!(first.sources, 1);
    assert_eq!(first.pool_len, 50);
}

#[tokio::test]
async fn token_budget_is_respected() {
    let server = start_mirror(30).await;
    let cache = tempfile::tempdir().unwrap();
    let library = library(&server, cache.path());
    let budget = TargetBudget::new(150, MeasureMode::Tokens).unwrap();

    let generated = Generator::new(WordCounter)
        .generate(&mut RandomShelf::new(&library), budget, &mut FixedStart(0))
        .await
        .unwrap();

    assert!(generated.size <= 150);
    assert!(WordCounter.count(&generated.text) <= 150);
    assert!(!generated.text.is_empty());
}

#[tokio::test]
async fn large_target_pulls_several_books() {
    let server = start_mirror(5).await;
    let cache = tempfile::tempdir().unwrap();
    let library = library(&server, cache.path());
    // Each book is at most 315 chars; 1.2 x 1000 needs at least four draws.
    let budget = TargetBudget::new(1_000, MeasureMode::Chars).unwrap();

    let mut shelf = RandomShelf::new(&library);
    let generated = Generator::new(WordCounter)
        .generate(&mut shelf, budget, &mut RandomStart)
        .await
        .unwrap();

    assert!(generated.sources >= 4);
    assert_eq!(shelf.drawn().len(), generated.sources);
    assert!(char_len(&generated.text) <= 1_000);
}

#[tokio::test]
async fn attempt_ceiling_surfaces_as_error() {
    let server = start_mirror(1).await;
    let cache = tempfile::tempdir().unwrap();
    let library = library(&server, cache.path());
    let budget = TargetBudget::new(1_000_000, MeasureMode::Chars).unwrap();

    let err = Generator::new(WordCounter)
        .with_builder(PoolBuilder::new().with_max_sources(4))
        .generate(&mut RandomShelf::new(&library), budget, &mut RandomStart)
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("gave up after 4 sources"), "{err}");
}

#[tokio::test]
async fn summary_reports_real_token_count() {
    let server = start_mirror(20).await;
    let cache = tempfile::tempdir().unwrap();
    let library = library(&server, cache.path());
    let counter = TokenCounter::new();
    let budget = TargetBudget::new(500, MeasureMode::Chars).unwrap();

    let generated = Generator::new(counter)
        .generate(&mut RandomShelf::new(&library), budget, &mut FixedStart(0))
        .await
        .unwrap();

    let tokens = counter.count(&generated.text);
    assert!(tokens > 0);
    let summary = format_summary(char_len(&generated.text), tokens, &Destination::Stdout);
    assert!(summary.starts_with("＞ "));
    assert!(summary.ends_with(&format!("({tokens} tokens)")));
}

#[test]
fn catalog_is_served_in_gutenberg_layout() {
    for book in CATALOG {
        assert_eq!(
            book.text_path(),
            format!("cache/epub/{0}/pg{0}.txt", book.ebook)
        );
    }
}
