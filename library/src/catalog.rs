//! Public-domain works the generator draws from.

/// One Project Gutenberg ebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Book {
    /// Gutenberg ebook number.
    pub ebook: u32,
    /// Cache key. Unique within the catalog.
    pub slug: &'static str,
    pub title: &'static str,
}

impl Book {
    pub const fn new(ebook: u32, slug: &'static str, title: &'static str) -> Self {
        Self { ebook, slug, title }
    }

    /// Path of the plain-text edition relative to a mirror root.
    #[must_use]
    pub fn text_path(&self) -> String {
        format!("cache/epub/{0}/pg{0}.txt", self.ebook)
    }
}

/// The built-in catalog.
pub const CATALOG: &[Book] = &[
    // British
    Book::new(1342, "pride_prejudice", "Pride and Prejudice"),
    Book::new(161, "sense_sensibility", "Sense and Sensibility"),
    Book::new(768, "wuthering_heights", "Wuthering Heights"),
    Book::new(98, "tale_two_cities", "A Tale of Two Cities"),
    Book::new(145, "middlemarch", "Middlemarch"),
    Book::new(158, "emma", "Emma"),
    Book::new(1400, "great_expectations", "Great Expectations"),
    // American
    Book::new(1952, "yellow_wallpaper", "The Yellow Wallpaper"),
    Book::new(1250, "anthem", "Anthem"),
    Book::new(76, "huck_finn", "Adventures of Huckleberry Finn"),
    Book::new(2701, "moby_dick", "Moby Dick"),
    Book::new(64317, "age_innocence", "The Age of Innocence"),
    Book::new(113, "secret_garden", "The Secret Garden"),
    // Gothic and mystery
    Book::new(84, "frankenstein", "Frankenstein"),
    Book::new(1661, "sherlock", "The Adventures of Sherlock Holmes"),
    Book::new(345, "dracula", "Dracula"),
    Book::new(43, "jekyll_hyde", "The Strange Case of Dr. Jekyll and Mr. Hyde"),
    Book::new(3268, "mysteries_udolpho", "The Mysteries of Udolpho"),
    // Early science fiction
    Book::new(35, "time_machine", "The Time Machine"),
    Book::new(36, "war_worlds", "The War of the Worlds"),
    Book::new(209, "turn_screw", "The Turn of the Screw"),
    Book::new(624, "looking_backward", "Looking Backward"),
    // Adventure and historical
    Book::new(120, "treasure_island", "Treasure Island"),
    Book::new(1184, "count_monte", "The Count of Monte Cristo"),
    Book::new(1257, "three_musketeers", "The Three Musketeers"),
    Book::new(1259, "twenty_years", "Twenty Years After"),
    // Social commentary
    Book::new(45, "anne_green_gables", "Anne of Green Gables"),
    Book::new(174, "picture_dorian", "The Picture of Dorian Gray"),
    Book::new(514, "little_women", "Little Women"),
    Book::new(730, "oliver_twist", "Oliver Twist"),
];

#[must_use]
pub fn find_book(slug: &str) -> Option<&'static Book> {
    CATALOG.iter().find(|book| book.slug == slug)
}
