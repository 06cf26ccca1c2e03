//! Display titles drawn per category when a node is materialized.

use rand_chacha::rand_core::Rng;

use crate::types::NodeCategory;

use super::seed::choose;

pub const UNKNOWN_TITLE: &str = "Unknown";

pub fn title_pool(category: &NodeCategory) -> &'static [&'static str] {
    match category {
        NodeCategory::Start => &["Start"],
        NodeCategory::Question => {
            &["Morning Rounds", "Case Review", "Patient Consult", "Treatment Planning"]
        }
        NodeCategory::Elite => &[
            "Physicist Meeting",
            "Challenging Case",
            "Equipment Failure",
            "Accreditation Review",
        ],
        NodeCategory::Shop => {
            &["Department Store", "Campus Bookstore", "Equipment Vendor", "Coffee Cart"]
        }
        NodeCategory::Rest => &["Break Room", "Cafeteria", "Library", "Quiet Corner"],
        NodeCategory::Treasure => &["Conference", "Journal Club", "Grand Rounds", "Workshop"],
        NodeCategory::Event => &[
            "Unexpected Call",
            "Patient Emergency",
            "Research Opportunity",
            "Department Meeting",
        ],
        NodeCategory::Gamble => &[
            "Journal Lottery",
            "Research Roulette",
            "Grant Application",
            "Experimental Treatment",
        ],
        NodeCategory::PatientCase | NodeCategory::Boss | NodeCategory::Custom(_) => &[],
    }
}

/// Uniform pick from the category's pool; categories without a pool get [`UNKNOWN_TITLE`].
pub fn pick_title<R: Rng + ?Sized>(rng: &mut R, category: &NodeCategory) -> String {
    choose(rng, title_pool(category)).copied().unwrap_or(UNKNOWN_TITLE).to_string()
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn titles_come_from_the_category_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..50 {
            let title = pick_title(&mut rng, &NodeCategory::Rest);
            assert!(title_pool(&NodeCategory::Rest).contains(&title.as_str()));
        }
    }

    #[test]
    fn custom_categories_are_titled_unknown() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert_eq!(pick_title(&mut rng, &NodeCategory::Custom("lab".into())), UNKNOWN_TITLE);
    }

    #[test]
    fn patient_cases_have_no_title_pool() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(title_pool(&NodeCategory::PatientCase).is_empty());
        assert_eq!(pick_title(&mut rng, &NodeCategory::PatientCase), UNKNOWN_TITLE);
    }
}
