//! Static where-to-watch tables.

pub const OTHER: &str = "Other";

/// Known title -> platform assignments, used when the record has no website.
pub const WHERE_TO_WATCH: &[(&str, &str)] = &[
    ("Inception", "Netflix"),
    ("The Matrix", "HBO Max"),
    ("Interstellar", "Paramount+"),
    ("Avatar", "Disney+"),
    ("Dune", "Max"),
    ("Gladiator", "Prime Video"),
    ("The Dark Knight", "Netflix"),
    ("Pulp Fiction", "Prime Video"),
    ("Oppenheimer", "Prime Video"),
    ("Barbie", "HBO Max"),
    ("Parasite", "Hulu"),
    ("Joker", "HBO Max"),
    ("The Shawshank Redemption", "Netflix"),
    ("The Godfather", "Prime Video"),
    ("Fight Club", "HBO Max"),
    ("Forrest Gump", "Paramount+"),
    ("The Lord of the Rings: The Return of the King", "Max"),
];

const PLATFORM_LOGOS: &[(&str, &str)] = &[
    (
        "Netflix",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/0/08/Netflix_2015_logo.svg/1198px-Netflix_2015_logo.svg.png",
    ),
    (
        "Prime Video",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/1/11/Amazon_Prime_Video_logo.svg/1200px-Amazon_Prime_Video_logo.svg.png",
    ),
    (
        "Disney+",
        "https://upload.wikimedia.org/wikipedia/en/thumb/1/1b/Disney_Plus_logo.svg/1200px-Disney_Plus_logo.svg.png",
    ),
    (
        "HBO Max",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/b/b3/HBO_Max_logo.svg/1200px-HBO_Max_logo.svg.png",
    ),
    (
        "Hulu",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e5/Hulu_logo.svg/1200px-Hulu_logo.svg.png",
    ),
    (
        "Paramount+",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/2/2f/Paramount%2B_logo.svg/1200px-Paramount%2B_logo.svg.png",
    ),
    (
        "Max",
        "https://upload.wikimedia.org/wikipedia/commons/thumb/b/b3/HBO_Max_logo.svg/1200px-HBO_Max_logo.svg.png",
    ),
];

const OTHER_LOGO: &str = "https://via.placeholder.com/48x28/777/ffffff?text=OTT";

/// Platform listed for an exact title, if any.
pub fn platform_for(title: &str) -> Option<&'static str> {
    WHERE_TO_WATCH
        .iter()
        .find(|(t, _)| *t == title)
        .map(|(_, platform)| *platform)
}

/// Logo URL for a platform name; unknown names get the generic logo.
pub fn logo_for(platform: &str) -> &'static str {
    PLATFORM_LOGOS
        .iter()
        .find(|(p, _)| *p == platform)
        .map(|(_, url)| *url)
        .unwrap_or(OTHER_LOGO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        assert_eq!(platform_for("Inception"), Some("Netflix"));
        assert_eq!(platform_for("inception"), None);
        assert_eq!(platform_for("Heat"), None);
    }

    #[test]
    fn unknown_platform_gets_generic_logo() {
        assert!(logo_for("Hulu").contains("Hulu_logo"));
        assert_eq!(logo_for(OTHER), OTHER_LOGO);
        assert_eq!(logo_for("Mubi"), OTHER_LOGO);
    }
}
