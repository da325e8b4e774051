use scraper::{ElementRef, Html, Selector};

/// The first form whose `attribute` (e.g. `hx-post`) equals `endpoint`.
#[track_caller]
pub(crate) fn must_get_form<'a>(html: &'a Html, attribute: &str, endpoint: &str) -> ElementRef<'a> {
    html.select(&Selector::parse("form").unwrap())
        .find(|form| form.value().attr(attribute) == Some(endpoint))
        .unwrap_or_else(|| panic!("No form found with {attribute}=\"{endpoint}\""))
}

fn find_input<'a>(form: &ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    form.select(&Selector::parse("input, select").unwrap())
        .find(|input| input.value().attr("name") == Some(name))
}

/// Assert the form has a required input called `name` of type `type_`.
///
/// `select` elements are matched with the type "select".
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = find_input(form, name).unwrap_or_else(|| panic!("No input named \"{name}\""));
    let got_type = if input.value().name() == "select" {
        "select"
    } else {
        input.value().attr("type").unwrap_or_default()
    };

    assert_eq!(got_type, type_, "want input {name} with type {type_:?}");
    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );
}

/// Assert the first input called `name` is pre-filled with `value`.
#[track_caller]
pub(crate) fn assert_form_input_value(form: &ElementRef<'_>, name: &str, value: &str) {
    let input = find_input(form, name).unwrap_or_else(|| panic!("No input named \"{name}\""));

    assert_eq!(input.value().attr("value").unwrap_or_default(), value);
}

#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>, text: &str) {
    let button = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .next()
        .expect("No submit button found");

    assert_eq!(button.text().collect::<String>().trim(), text);
}
