use super::*;

#[test]
fn ids_are_comma_separated() {
    assert_eq!(join_ids(&["A".to_owned(), "B".to_owned()]), "A, B");
    assert_eq!(join_ids(&[]), "");
}

#[test]
fn p_values_print_without_padding() {
    assert_eq!(format_p_value(0.1), "0.1");
    assert_eq!(format_p_value(0.5), "0.5");
    assert_eq!(format_p_value(0.0), "0");
    assert_eq!(format_p_value(network::tools::round_p_value(0.123_456)), "0.12");
}
