//! Built-in word packs restored by a reset
use crate::pack::{PackColor, WordPack, words};

/// Name, icon and placeholder words of the pack added by "new pack".
pub const NEW_PACK_NAME: &str = "New Pack";
pub const NEW_PACK_ICON: &str = "pencil";
pub const NEW_PACK_WORDS: [&str; 2] = ["Word 1", "Word 2"];

/// Template for a freshly created, user-editable pack.
#[must_use]
pub fn new_pack_template() -> WordPack {
    WordPack::new(
        NEW_PACK_NAME,
        NEW_PACK_ICON,
        PackColor::PURPLE,
        words(&NEW_PACK_WORDS),
    )
}

/// The curated default catalog. Every call mints fresh pack ids.
#[must_use]
pub fn default_packs() -> Vec<WordPack> {
    vec![
        WordPack::new(
            "Countries",
            "globe.europe.africa.fill",
            PackColor::BLUE,
            words(&[
                "Spain",
                "France",
                "Italy",
                "Japan",
                "Brazil",
                "Egypt",
                "United States",
                "China",
                "Russia",
                "Mexico",
                "Argentina",
                "Germany",
                "Australia",
                "India",
                "Canada",
                "United Kingdom",
            ]),
        ),
        WordPack::new(
            "Cities",
            "building.2.fill",
            PackColor::CYAN,
            words(&[
                "Madrid",
                "Barcelona",
                "New York",
                "Tokyo",
                "Paris",
                "London",
                "Rome",
                "Dubai",
                "Los Angeles",
                "Berlin",
                "Amsterdam",
                "Venice",
                "Sydney",
                "Rio de Janeiro",
            ]),
        ),
        WordPack::new(
            "Transport",
            "car.fill",
            PackColor::GRAY,
            words(&[
                "Airplane",
                "Helicopter",
                "Submarine",
                "Hot Air Balloon",
                "Electric Scooter",
                "Tuk-tuk",
                "Tram",
                "Cable Car",
                "Yacht",
                "Rocket",
                "Sled",
                "Carriage",
            ]),
        ),
        WordPack::new(
            "Movies",
            "film.fill",
            PackColor::TEAL,
            words(&[
                "Titanic",
                "Jurassic Park",
                "The Lion King",
                "Star Wars",
                "Frozen",
                "The Godfather",
                "Toy Story",
                "Jaws",
                "Inception",
                "Shrek",
                "Avatar",
                "Grease",
            ]),
        ),
        WordPack::new(
            "Athletes",
            "figure.run",
            PackColor::ORANGE,
            words(&[
                "Rafa Nadal",
                "Fernando Alonso",
                "Carlos Alcaraz",
                "Pau Gasol",
                "Serena Williams",
                "Usain Bolt",
                "Michael Jordan",
                "Simone Biles",
                "Lewis Hamilton",
                "Alexia Putellas",
                "Cristiano Ronaldo",
                "Leo Messi",
            ]),
        ),
        WordPack::new(
            "Music",
            "music.note",
            PackColor::PINK,
            words(&[
                "Rosalia",
                "Bad Bunny",
                "Shakira",
                "Karol G",
                "Bizarrap",
                "Taylor Swift",
                "Beyonce",
                "The Beatles",
                "Queen",
                "Madonna",
                "Elvis Presley",
                "Michael Jackson",
            ]),
        ),
        WordPack::new(
            "Superheroes",
            "bolt.fill",
            PackColor::INDIGO,
            words(&[
                "Spider-Man",
                "Batman",
                "Iron Man",
                "Superman",
                "Wonder Woman",
                "Thor",
                "Hulk",
                "Captain America",
                "Deadpool",
                "Wolverine",
                "Joker",
                "Thanos",
            ]),
        ),
        WordPack::new(
            "Animals",
            "pawprint.fill",
            PackColor::GREEN,
            words(&[
                "Platypus",
                "Narwhal",
                "Sloth",
                "Lion",
                "Elephant",
                "Shark",
                "Mosquito",
                "Cockroach",
                "Jellyfish",
                "Panda",
                "Tyrannosaurus",
                "Unicorn",
            ]),
        ),
        WordPack::new(
            "Food",
            "fork.knife",
            PackColor::RED,
            words(&[
                "Pineapple Pizza",
                "Sushi",
                "Tripe",
                "Broccoli",
                "Kebab",
                "Tofu",
                "Caviar",
                "Grasshoppers",
                "Croquette",
                "Churros",
                "Gazpacho",
                "Wasabi",
            ]),
        ),
        WordPack::new(
            "Jobs",
            "briefcase.fill",
            PackColor::CYAN,
            words(&[
                "Astronaut",
                "Firefighter",
                "Dentist",
                "Lifeguard",
                "Magician",
                "Plumber",
                "Pilot",
                "Chef",
                "Detective",
                "Librarian",
                "Surgeon",
                "Clown",
            ]),
        ),
        WordPack::new(
            "Spicy",
            "flame.fill",
            PackColor::RED,
            words(&[
                "Tinder",
                "Striptease",
                "Kamasutra",
                "Threesome",
                "Fetish",
                "Handcuffs",
                "Voyeur",
                "Orgasm",
                "Aphrodisiac",
                "Lingerie",
                "Naked",
                "Walk of Shame",
            ]),
        )
        .adult(),
        WordPack::new(
            "Taboo",
            "exclamationmark.triangle.fill",
            PackColor::PURPLE,
            words(&[
                "Drugs",
                "Alcohol",
                "Hangover",
                "Vomit",
                "Jail Cell",
                "Infidelity",
                "Cheating",
                "Bribery",
                "Smuggling",
                "Gambling",
                "Blackmail",
            ]),
        )
        .adult(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_twelve_packs_two_adult() {
        let packs = default_packs();
        assert_eq!(packs.len(), 12);
        assert_eq!(packs.iter().filter(|p| p.is_adult).count(), 2);
        assert!(packs.iter().all(|p| !p.is_generated && !p.is_selected));
        assert!(packs.iter().all(|p| !p.words.is_empty()));
    }

    #[test]
    fn catalog_names_are_unique_and_ids_fresh() {
        let first = default_packs();
        let second = default_packs();
        let names: HashSet<_> = first.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), first.len());
        assert!(first.iter().zip(&second).all(|(a, b)| a.id != b.id));
    }

    #[test]
    fn new_pack_template_is_editable_placeholder() {
        let pack = new_pack_template();
        assert_eq!(pack.name, NEW_PACK_NAME);
        assert_eq!(pack.words, vec!["Word 1", "Word 2"]);
        assert!(!pack.is_generated);
    }
}
