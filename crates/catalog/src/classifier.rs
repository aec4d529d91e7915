//! Keyword heuristics that turn a free-text (Russian) description into a
//! category and a display name.
//!
//! Matching is a plain substring test on the lower-cased description. Words
//! are not tokenized, so a keyword embedded in an unrelated word still matches.

use jewelstore_core::ProductId;

use crate::product::Category;

type KeywordGroup<T> = (&'static [&'static str], T);

/// Category groups, first match wins.
const CATEGORY_GROUPS: &[KeywordGroup<Category>] = &[
    (&["кольцо", "перстень"], Category::Rings),
    (&["серьги", "серёжки"], Category::Earrings),
    (&["цепочка", "цепь", "колье", "ожерелье"], Category::ChainsAndNecklaces),
    (&["браслет"], Category::Bracelets),
    (&["подвеска", "кулон"], Category::Pendants),
    (&["брошь", "брошка"], Category::Brooches),
    (&["запонки"], Category::Cufflinks),
];

/// Base nouns for names. Chains and necklaces share a category but not a noun.
const BASE_NAME_GROUPS: &[KeywordGroup<&str>] = &[
    (&["кольцо", "перстень"], "Ring"),
    (&["серьги", "серёжки"], "Earrings"),
    (&["цепочка", "цепь"], "Chain"),
    (&["колье", "ожерелье"], "Necklace"),
    (&["браслет"], "Bracelet"),
    (&["подвеска", "кулон"], "Pendant"),
    (&["брошь", "брошка"], "Brooch"),
    (&["запонки"], "Cufflinks"),
];

const FALLBACK_BASE_NAME: &str = "Item";

const MATERIAL_GROUPS: &[KeywordGroup<&str>] = &[
    (&["золот", "золоч"], "gold"),
    (&["серебр"], "silver"),
    (&["платин"], "platinum"),
];

/// Every matching stone contributes, in this order.
const STONE_GROUPS: &[KeywordGroup<&str>] = &[
    (&["бриллиант", "алмаз"], "with diamond"),
    (&["изумруд"], "with emerald"),
    (&["рубин"], "with ruby"),
    (&["сапфир"], "with sapphire"),
    (&["жемчуг"], "with pearl"),
    (&["топаз"], "with topaz"),
];

fn matches_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

fn first_match<T: Copy>(haystack: &str, groups: &[KeywordGroup<T>]) -> Option<T> {
    groups
        .iter()
        .find(|(keywords, _)| matches_any(haystack, keywords))
        .map(|(_, value)| *value)
}

/// Category for a description; [`Category::Jewelry`] when nothing matches.
pub fn classify(description: &str) -> Category {
    first_match(&description.to_lowercase(), CATEGORY_GROUPS).unwrap_or(Category::Jewelry)
}

/// Display name for a description.
///
/// Precedence: material and stones, then material only, then stones only,
/// then the `№{id}` suffix.
pub fn build_name(description: &str, id: ProductId) -> String {
    if description.trim().is_empty() {
        return format!("{FALLBACK_BASE_NAME} №{id}");
    }

    let lowered = description.to_lowercase();
    let base = first_match(&lowered, BASE_NAME_GROUPS).unwrap_or(FALLBACK_BASE_NAME);
    let material = first_match(&lowered, MATERIAL_GROUPS);
    let stones = STONE_GROUPS
        .iter()
        .filter(|(keywords, _)| matches_any(&lowered, keywords))
        .map(|(_, phrase)| *phrase)
        .collect::<Vec<_>>();

    match (material, stones.is_empty()) {
        (Some(material), false) => format!("{base} {material} {}", stones.join(" and ")),
        (Some(material), true) => format!("{base} {material}"),
        (None, false) => format!("{base} {}", stones.join(" and ")),
        (None, true) => format!("{base} №{id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: u64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    #[test]
    fn gold_chain_with_diamond() {
        let text = "Золотая цепочка с бриллиантом";
        assert_eq!(classify(text), Category::ChainsAndNecklaces);
        assert_eq!(build_name(text, pid(7)), "Chain gold with diamond");
    }

    #[test]
    fn empty_description_uses_id() {
        assert_eq!(build_name("", pid(9)), "Item №9");
        assert_eq!(classify(""), Category::Jewelry);
    }

    #[test]
    fn first_type_group_wins() {
        // "кольцо" outranks "серьги" even though both are present.
        let text = "Комплект: серьги и кольцо";
        assert_eq!(classify(text), Category::Rings);
        assert!(build_name(text, pid(1)).starts_with("Ring"));
    }

    #[test]
    fn necklace_gets_its_own_noun_but_shares_category() {
        let text = "Колье из жемчуга";
        assert_eq!(classify(text), Category::ChainsAndNecklaces);
        assert_eq!(build_name(text, pid(2)), "Necklace with pearl");
    }

    #[test]
    fn all_matching_stones_are_listed_in_order() {
        let text = "перстень с рубином, сапфиром и бриллиантами";
        assert_eq!(
            build_name(text, pid(4)),
            "Ring with diamond and with ruby and with sapphire"
        );
    }

    #[test]
    fn material_only() {
        assert_eq!(build_name("Браслет из платины", pid(5)), "Bracelet platinum");
        assert_eq!(build_name("ПОЗОЛОЧЕННАЯ брошь", pid(6)), "Brooch gold");
    }

    #[test]
    fn neither_material_nor_stones_appends_id() {
        assert_eq!(build_name("Кулон ручной работы", pid(12)), "Pendant №12");
        assert_eq!(build_name("Something else", pid(13)), "Item №13");
    }

    #[test]
    fn gold_beats_silver_for_material() {
        assert_eq!(
            build_name("запонки: серебро с золотым напылением", pid(3)),
            "Cufflinks gold"
        );
    }

    #[test]
    fn embedded_keywords_still_match() {
        // "рубин" inside a surname still reads as a ruby.
        let text = "Браслет коллекции Рубинштейн";
        assert_eq!(classify(text), Category::Bracelets);
        assert_eq!(build_name(text, pid(8)), "Bracelet with ruby");
    }

    #[test]
    fn uppercase_and_yo_are_handled() {
        assert_eq!(classify("СЕРЁЖКИ"), Category::Earrings);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: names are never empty and classification is total.
            #[test]
            fn name_never_empty(description in "\\PC{0,64}", raw in 1u64..1_000_000u64) {
                let name = build_name(&description, pid(raw));
                prop_assert!(!name.trim().is_empty());
                prop_assert!(Category::ALL.contains(&classify(&description)));
            }

            /// Property: the id suffix appears exactly when no material or stone matched.
            #[test]
            fn id_suffix_only_without_attributes(raw in 1u64..1_000u64) {
                let name = build_name("кольцо", pid(raw));
                prop_assert_eq!(name, format!("Ring №{raw}"));
            }
        }
    }
}
