#![allow(missing_docs)]

pub(crate) mod dataset;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use dataset::{record, sample_dataset, sample_state};
pub(crate) use form::{
    assert_checkbox, assert_hx_endpoint, assert_sentinel, checkbox_values, must_get_form,
    submitted_pairs,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_status_ok};
