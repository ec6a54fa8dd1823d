use proptest::prelude::*;
use wardrobe_core::{
    escape_html, validate, Candidate, ClothingItem, ItemId, Renderer, Size, ValidationError,
};

fn size_strategy() -> impl Strategy<Value = Size> {
    proptest::sample::select(Size::ALL.to_vec())
}

/// Free text that is never blank once trimmed.
fn text_strategy() -> impl Strategy<Value = String> {
    any::<String>().prop_map(|s| format!("x{s}"))
}

fn valid_candidate() -> impl Strategy<Value = Candidate> {
    (
        "[A-Za-zÀ-ú ]{2,24}",
        "[A-Za-zÀ-ú ]{5,80}",
        size_strategy(),
        0.0f64..100_000.0,
        proptest::option::of("https?://[a-z]{1,12}\\.example/[a-z0-9]{0,12}\\.png"),
    )
        .prop_map(|(name, description, size, price, image)| Candidate {
            name,
            description,
            size: size.as_str().to_string(),
            price: Some(price),
            image,
        })
}

fn count_markup(markup: &str) -> [usize; 3] {
    [
        markup.matches('<').count(),
        markup.matches('>').count(),
        markup.matches('"').count(),
    ]
}

fn item(id: &str, name: &str, description: &str, image: &str) -> ClothingItem {
    ClothingItem {
        id: ItemId::from(id),
        name: Some(name.to_string()),
        description: Some(description.to_string()),
        size: Some(Size::Medium.into()),
        price: Some(10.0),
        image: Some(image.to_string()),
    }
}

proptest! {
    #[test]
    fn valid_candidates_pass(candidate in valid_candidate()) {
        prop_assert_eq!(validate(&candidate), None);
        prop_assert!(candidate.into_draft().is_ok());
    }

    #[test]
    fn short_name_wins_over_every_later_rule(
        name in "[a-z]{0,1}",
        description in "[a-z]{0,4}",
        size in "[a-z]{0,3}",
        price in proptest::option::of(-100.0f64..0.0),
        image in proptest::option::of("[a-z]{1,8}"),
    ) {
        let candidate = Candidate { name, description, size, price, image };
        prop_assert_eq!(validate(&candidate), Some(ValidationError::NameTooShort));
    }

    #[test]
    fn first_broken_rule_is_reported(
        base in valid_candidate(),
        broken in proptest::collection::vec(any::<bool>(), 5),
    ) {
        let mut candidate = base;
        if broken[0] { candidate.name = "a".to_string(); }
        if broken[1] { candidate.description = "abc".to_string(); }
        if broken[2] { candidate.size = String::new(); }
        if broken[3] { candidate.price = None; }
        if broken[4] { candidate.image = Some("ftp://files.example/a.png".to_string()); }

        let expected = [
            ValidationError::NameTooShort,
            ValidationError::DescriptionTooShort,
            ValidationError::MissingSize,
            ValidationError::InvalidPrice,
            ValidationError::InvalidImageUrl,
        ]
        .into_iter()
        .zip(&broken)
        .find_map(|(err, &is_broken)| is_broken.then_some(err));

        prop_assert_eq!(validate(&candidate), expected);
    }

    #[test]
    fn escaped_text_has_no_markup_characters(input in any::<String>()) {
        let escaped = escape_html(&input);
        prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
    }

    #[test]
    fn record_text_never_adds_markup(
        id in text_strategy(),
        name in text_strategy(),
        description in text_strategy(),
        image in text_strategy(),
    ) {
        let renderer = Renderer::default();
        let plain = item("x", "x", "x", "x");
        let hostile = item(&id, &name, &description, &image);

        prop_assert_eq!(
            count_markup(&renderer.render_list_item(&hostile)),
            count_markup(&renderer.render_list_item(&plain))
        );
        prop_assert_eq!(
            count_markup(&renderer.render_detail(&hostile)),
            count_markup(&renderer.render_detail(&plain))
        );
    }
}
