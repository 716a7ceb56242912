use std::collections::BTreeSet;

use pomonoid::{
    error::PomonoidError,
    monoid::Pomonoid,
    presentation::Presentation,
    product::{ProductPomonoid, TieBreak},
};

fn field() -> Pomonoid {
    Pomonoid::with_elements(
        Presentation::standard().with_relations(&[("r", "1"), ("aa", "1")]),
        &["1", "a"],
    )
    .unwrap()
}

// The two-element monoid generated by r instead of a.
fn field_twin() -> Pomonoid {
    Pomonoid::new(Presentation::standard().with_relations(&[("a", "1")])).unwrap()
}

fn zdrb() -> Pomonoid {
    Pomonoid::new(
        Presentation::standard()
            .with_relations(&[("rara", "rar"), ("aar", "r"), ("raa", "r")])
            .with_order(&[
                ("r", "aa"),
                ("r", "rar"),
                ("ra", "rar"),
                ("ra", "a"),
                ("aa", "ara"),
                ("aa", "1"),
                ("a", "ar"),
                ("rar", "arar"),
                ("arar", "ara"),
                ("arar", "ar"),
            ]),
    )
    .unwrap()
}

fn zdrc() -> Pomonoid {
    Pomonoid::new(
        Presentation::standard()
            .with_relations(&[("ara", "ar"), ("rara", "aar"), ("raar", "aar")])
            .with_order(&[
                ("aar", "raa"),
                ("aar", "ra"),
                ("raa", "aa"),
                ("raa", "r"),
                ("ra", "rar"),
                ("ra", "a"),
                ("aa", "1"),
                ("r", "1"),
                ("r", "rar"),
                ("a", "ar"),
                ("1", "ar"),
                ("rar", "ar"),
            ]),
    )
    .unwrap()
}

#[test]
fn two_element_square_has_four_component_pairs() {
    let field = field();
    let twin = field_twin();

    let product = ProductPomonoid::new(&field, &twin).unwrap();

    let pairs: BTreeSet<_> = product.pairs().collect();
    assert_eq!(
        pairs,
        BTreeSet::from([("1", "1"), ("a", "1"), ("1", "r"), ("a", "r")])
    );

    let words: BTreeSet<_> = product.elements().map(|element| element.word()).collect();
    assert_eq!(words, BTreeSet::from(["1", "a", "r", "ra"]));

    // Neither component declares an order, so only reflexive comparisons hold.
    let one = product.lookup("1").unwrap();
    let top = product.lookup("ra").unwrap();
    assert!(product.compare(one, one).unwrap());
    assert!(!product.compare(top, one).unwrap());

    let collapses: BTreeSet<_> = product.collapses().collect();
    assert_eq!(
        collapses,
        BTreeSet::from([
            ("1", "aa"),
            ("ra", "ar"),
            ("ra", "rar"),
            ("r", "aar"),
            ("r", "ara"),
            ("r", "raa"),
        ])
    );
}

#[test]
fn equal_length_collapse_respects_the_tie_break() {
    let field = field();
    let twin = field_twin();

    // ar and ra land on the same pair; the lexicographic convention keeps ar.
    let product = ProductPomonoid::with_tie_break(&field, &twin, TieBreak::Lexicographic).unwrap();

    let words: BTreeSet<_> = product.elements().map(|element| element.word()).collect();
    assert_eq!(words, BTreeSet::from(["1", "a", "r", "ar"]));
    assert!(product.collapses().any(|pair| pair == ("ar", "ra")));
    assert!(product.collapses().any(|pair| pair == ("ar", "rar")));
}

#[test]
fn export_relations_rewrite_collapsed_words_to_canonical_ones() {
    let field = field();
    let twin = field_twin();

    let exported = ProductPomonoid::new(&field, &twin).unwrap().export().unwrap();

    let elements: BTreeSet<_> = exported.elements().collect();
    assert_eq!(elements, BTreeSet::from(["1", "a", "r", "ra"]));

    // The discovered congruences now act as an ordinary rewrite system.
    assert_eq!(exported.reducer().reduce("ar").unwrap(), "ra");
    assert_eq!(exported.reducer().reduce("rar").unwrap(), "ra");
    assert_eq!(exported.reducer().reduce("aar").unwrap(), "r");
    assert_eq!(exported.product("a", "r").unwrap(), "ra");
}

#[test]
fn product_elements_are_deduplicated_by_pair() {
    let zdrb = zdrb();
    let field = field();

    let product = ProductPomonoid::new(&zdrb, &field).unwrap();

    assert_eq!(product.len(), 11);

    let pairs: BTreeSet<_> = product.pairs().collect();
    assert_eq!(pairs.len(), 11);
    assert!(pairs.contains(&("rar", "a")));
    assert!(pairs.contains(&("rar", "1")));

    // rar appears with both parities, under distinct labels.
    assert_eq!(product.lookup("rar").unwrap().pair(), ("rar", "a"));
    assert_eq!(product.lookup("rara").unwrap().pair(), ("rar", "1"));
}

#[test]
fn congruences_are_sound() {
    let zdrb = zdrb();
    let field = field();

    let product = ProductPomonoid::new(&zdrb, &field).unwrap();

    for (canonical, collapsed) in product.collapses() {
        assert_ne!(canonical, collapsed);
        assert_eq!(
            zdrb.reducer().reduce(canonical).unwrap(),
            zdrb.reducer().reduce(collapsed).unwrap()
        );
        assert_eq!(
            field.reducer().reduce(canonical).unwrap(),
            field.reducer().reduce(collapsed).unwrap()
        );
    }
}

#[test]
fn product_order_is_the_componentwise_conjunction() {
    let zdrb = zdrb();
    let field = field();

    let product = ProductPomonoid::new(&zdrb, &field).unwrap();

    let elements: Vec<_> = product.elements().cloned().collect();

    for x in &elements {
        for y in &elements {
            let expected = zdrb.compare(x.left(), y.left()).unwrap()
                && field.compare(x.right(), y.right()).unwrap();

            assert_eq!(product.compare(x, y).unwrap(), expected);
        }
    }

    let ra = product.lookup("ra").unwrap();
    let a = product.lookup("a").unwrap();
    assert!(product.compare(ra, a).unwrap());
    assert!(!product.compare(a, ra).unwrap());
}

#[test]
fn product_table_is_closed_and_componentwise() {
    let zdrb = zdrb();
    let field = field();

    let product = ProductPomonoid::new(&zdrb, &field).unwrap();

    let a = product.lookup("a").unwrap();
    let r = product.lookup("r").unwrap();

    let ar = product.product(a, r).unwrap();
    assert_eq!(ar.pair(), ("ar", "a"));
    assert_eq!(ar.word(), "ar");

    let identity = product.lookup("1").unwrap();
    for x in product.elements() {
        assert_eq!(product.product(x, identity).unwrap(), x);
        assert_eq!(product.product(identity, x).unwrap(), x);
    }
}

#[test]
fn export_seeds_a_three_way_product() {
    let zdrb = zdrb();
    let zdrc = zdrc();
    let field = field();

    let pairwise = ProductPomonoid::new(&zdrb, &zdrc).unwrap();
    assert_eq!(pairwise.len(), 13);

    let exported = pairwise.export().unwrap();
    assert_eq!(exported.len(), 13);

    let relations: BTreeSet<_> = exported
        .presentation()
        .relations()
        .map(|rule| (rule.pattern().to_owned(), rule.replacement().to_owned()))
        .collect();
    let expected: BTreeSet<_> = [
        ("aaraa", "aar"),
        ("raar", "aar"),
        ("raara", "aara"),
        ("araa", "ar"),
        ("araar", "ar"),
        ("arara", "arar"),
        ("aarar", "rara"),
        ("raraa", "rara"),
        ("rarar", "rara"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (pattern.to_owned(), replacement.to_owned()))
    .collect();
    assert_eq!(relations, expected);

    // The exported pomonoid carries the product's order verbatim.
    assert_eq!(
        exported.compare("r", "aa").unwrap(),
        zdrb.compare("r", "aa").unwrap() && zdrc.compare("r", "aa").unwrap()
    );

    let three_way = ProductPomonoid::new(&exported, &field).unwrap();
    assert_eq!(three_way.len(), 16);

    // Two distinct three-way elements share a label, so this product cannot
    // be exported again.
    assert_eq!(
        three_way.export().err(),
        Some(PomonoidError::AmbiguousLabel("rara".to_owned()))
    );
}

#[test]
fn mismatched_alphabets_cannot_form_a_product() {
    let field = field();
    let kura = Pomonoid::new(Presentation::new(
        &['c', 'k'],
        &[("cc", "1"), ("kk", "k"), ("kckckck", "kck")],
    ))
    .unwrap();

    assert_eq!(
        ProductPomonoid::new(&field, &kura).err(),
        Some(PomonoidError::ComponentMismatch)
    );
}
