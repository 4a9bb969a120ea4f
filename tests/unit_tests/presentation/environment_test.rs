use civicbridge::presentation::Environment;

#[test]
fn given_known_names_when_parsing_environment_then_case_is_ignored() {
    assert_eq!(Environment::try_from("LOCAL".to_string()), Ok(Environment::Local));
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
}

#[test]
fn given_unknown_name_when_parsing_environment_then_error_lists_choices() {
    let err = Environment::try_from("staging".to_string()).unwrap_err();
    assert!(err.contains("staging"));
    assert!(err.contains("local, test, or prod"));
}
