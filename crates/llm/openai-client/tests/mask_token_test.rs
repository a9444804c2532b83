//! Tests for [`openai_client::mask_token`]: keys are logged as head(7) + `***` + tail(4).

use openai_client::mask_token;

#[test]
fn mask_token_short_returns_all_star() {
    assert_eq!(mask_token(""), "***");
    assert_eq!(mask_token("sk-12345"), "***");
    assert_eq!(mask_token("sk-proj-123"), "***");
}

#[test]
fn mask_token_long_shows_head_and_tail() {
    assert_eq!(mask_token("sk-proj-abcdefghijklmnop"), "sk-proj***mnop");
    assert_eq!(mask_token("sk-proj-xyzw"), "sk-proj***xyzw");
}

/// Multi-byte keys must not panic on a char boundary; they fall back to full masking.
#[test]
fn mask_token_non_ascii_does_not_panic() {
    assert_eq!(mask_token("ééééééééééé"), "***");
}

#[test]
fn completion_options_default_matches_server_defaults() {
    let options = openai_client::CompletionOptions::default();
    assert_eq!(options.max_tokens, 1024);
    assert!((options.temperature - 0.7).abs() < f32::EPSILON);
}
