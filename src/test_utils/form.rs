use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_get = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_get, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {hx_get:?}"
    );
}

/// Assert that `form` has a checkbox for `name` with `value` in the given checked state.
#[track_caller]
pub(crate) fn assert_checkbox(form: &ElementRef<'_>, name: &str, value: &str, checked: bool) {
    let selector = Selector::parse(&format!(
        "input[type='checkbox'][name='{name}'][value='{value}']"
    ))
    .unwrap();

    let checkbox = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No checkbox found with name \"{name}\" and value \"{value}\""));

    assert_eq!(
        checkbox.value().attr("checked").is_some(),
        checked,
        "want checkbox {name}={value} checked={checked}"
    );
}

/// Assert that `form` submits the empty sentinel value for `name`.
#[track_caller]
pub(crate) fn assert_sentinel(form: &ElementRef<'_>, name: &str) {
    let selector =
        Selector::parse(&format!("input[type='hidden'][name='{name}'][value='']")).unwrap();

    assert!(
        form.select(&selector).next().is_some(),
        "want hidden sentinel input for \"{name}\""
    );
}

/// The values of the checkboxes named `name`.
pub(crate) fn checkbox_values(form: &ElementRef<'_>, name: &str) -> Vec<String> {
    let selector = Selector::parse(&format!("input[type='checkbox'][name='{name}']")).unwrap();

    form.select(&selector)
        .filter_map(|input| input.value().attr("value"))
        .map(str::to_owned)
        .collect()
}

/// The name and value pairs `form` submits as currently filled in: every
/// hidden or range input, and the checkboxes that are ticked.
pub(crate) fn submitted_pairs(form: &ElementRef<'_>) -> Vec<(String, String)> {
    form.select(&Selector::parse("input[name]").unwrap())
        .filter(|input| {
            input.value().attr("type") != Some("checkbox")
                || input.value().attr("checked").is_some()
        })
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            let value = input.value().attr("value").unwrap_or_default();
            Some((name.to_owned(), value.to_owned()))
        })
        .collect()
}
