use xray_aliases::candidate::{generate, split_title, NameParts};

#[test]
fn general_honorific_uses_surname() {
    assert_eq!(generate("Mr. John Doe"), vec!["Mr. Doe", "John", "Doe", "John Doe"]);
}

#[test]
fn religious_honorific_uses_christian_name() {
    assert_eq!(generate("Father John Doe"), vec!["Father John", "John", "Doe", "John Doe"]);
    // abbreviated religious titles only exist in the religious list
    assert_eq!(generate("Sr. Mary Clarence"), vec!["Sr. Mary", "Mary", "Clarence", "Mary Clarence"]);
}

#[test]
fn double_use_honorific_emits_both_forms() {
    assert_eq!(
        generate("Lord John Doe"),
        vec!["Lord John", "Lord Doe", "John", "Doe", "John Doe"]
    );
}

#[test]
fn single_name_without_title_has_no_aliases() {
    assert!(generate("Gandalf").is_empty());
}

#[test]
fn title_with_single_name() {
    assert_eq!(generate("Lord Buttsworth"), vec!["Buttsworth"]);
    assert_eq!(generate("Doctor Who"), vec!["Who"]);
    assert_eq!(generate("MRS. Hudson"), vec!["Hudson"], "titles match case-insensitively");
}

#[test]
fn title_alone_or_empty_name() {
    assert!(generate("Captain").is_empty());
    assert!(generate("Lt. Col.").is_empty());
    assert!(generate("").is_empty());
    assert!(generate("   ").is_empty());
}

#[test]
fn multi_word_title_is_general() {
    assert_eq!(
        generate("Lt. Col. James Rhodes"),
        vec!["Lt. Col. Rhodes", "James", "Rhodes", "James Rhodes"]
    );
    // "Lord" inside a longer title no longer selects the double-use policy
    assert_eq!(generate("Sir Lord John Doe"), vec!["Sir Lord Doe", "John", "Doe", "John Doe"]);
}

#[test]
fn middle_names_are_not_candidates() {
    assert_eq!(
        generate("Sir John Ronald Reuel Tolkien"),
        vec!["Sir Tolkien", "John", "Tolkien", "John Tolkien"]
    );
    assert_eq!(generate("Jean de Florette"), vec!["Jean", "Florette", "Jean Florette"]);
}

#[test]
fn whitespace_is_collapsed_and_case_preserved() {
    assert_eq!(generate("  jOHN \t  doE "), vec!["jOHN", "doE", "jOHN doE"]);
}

#[test]
fn candidates_are_not_deduplicated() {
    assert_eq!(generate("Doe Doe"), vec!["Doe", "Doe", "Doe Doe"]);
}

#[test]
fn name_parts() {
    let parts = NameParts::parse("Lt. Col. James Tiberius Rhodes").expect("parts");
    assert_eq!(parts.title.as_deref(), Some("Lt. Col."));
    assert_eq!(parts.christian_name, "James");
    assert_eq!(parts.middle_names, vec!["Tiberius".to_string()]);
    assert_eq!(parts.surname, "Rhodes");

    let parts = NameParts::parse("John Doe").expect("parts");
    assert_eq!(parts.title, None);
    assert!(parts.middle_names.is_empty());

    assert!(NameParts::parse("Lord Buttsworth").is_none(), "one token after the title");
    assert!(NameParts::parse("Gandalf").is_none());
}

#[test]
fn split_title_stops_at_first_plain_token() {
    let (title, rest) = split_title("Dr. Mr. John Lord Doe");
    assert_eq!(title.as_deref(), Some("Dr. Mr."));
    assert_eq!(rest, vec!["John", "Lord", "Doe"]);

    let (title, rest) = split_title("John Doe");
    assert_eq!(title, None);
    assert_eq!(rest, vec!["John", "Doe"]);
}
