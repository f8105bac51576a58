/// Label used for major versions with no known platform.
pub const UNKNOWN_VERSION: &str = "Unknown version";

const PLATFORM_NAMES: [(u16, &str); 25] = [
    (45, "JDK 1.1"),
    (46, "JDK 1.2"),
    (47, "JDK 1.3"),
    (48, "JDK 1.4"),
    (49, "J2SE 5.0"),
    (50, "J2SE 6.0"),
    (51, "J2SE 7"),
    (52, "J2SE 8"),
    (53, "Java SE 9"),
    (54, "Java SE 10"),
    (55, "Java SE 11"),
    (56, "Java SE 12"),
    (57, "Java SE 13"),
    (58, "Java SE 14"),
    (59, "Java SE 15"),
    (60, "Java SE 16"),
    (61, "Java SE 17"),
    (62, "Java SE 18"),
    (63, "Java SE 19"),
    (64, "Java SE 20"),
    (65, "Java SE 21"),
    (66, "Java SE 22"),
    (67, "Java SE 23"),
    (68, "Java SE 24"),
    (69, "Java SE 25"),
];

/// Name of the Java platform that introduced a class file major version.
/// The minor version plays no part in it.
pub fn platform_name(major_version: u16) -> &'static str {
    PLATFORM_NAMES
        .iter()
        .find(|(major, _)| *major == major_version)
        .map_or(UNKNOWN_VERSION, |(_, name)| *name)
}
