use serde::{Deserialize, Serialize};

/// The spending classes of the allocation breakdown.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Need,
    Want,
    Investment,
}

serde_plain::derive_display_from_serialize!(Bucket);
serde_plain::derive_fromstr_from_deserialize!(Bucket);

/// How a category's amount is attributed to buckets.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Assignment {
    /// The whole amount counts toward one bucket.
    Whole(Bucket),
    /// Half the amount counts as a need and half as a want.
    SplitNeedWant,
}

/// Category names (lower-case) and the bucket each belongs to.
pub const CATEGORY_BUCKETS: &[(&str, Assignment)] = &[
    ("rent", Assignment::Whole(Bucket::Need)),
    ("grocery", Assignment::Whole(Bucket::Need)),
    ("petrol", Assignment::Whole(Bucket::Need)),
    ("gas & water", Assignment::Whole(Bucket::Need)),
    ("medicine", Assignment::Whole(Bucket::Need)),
    ("eb & ec", Assignment::Whole(Bucket::Need)),
    ("emergency fund", Assignment::Whole(Bucket::Need)),
    ("car maintenance", Assignment::Whole(Bucket::Need)),
    ("bike maintenance", Assignment::Whole(Bucket::Need)),
    ("relatives", Assignment::Whole(Bucket::Need)),
    ("last month debt", Assignment::Whole(Bucket::Need)),
    ("home app/maintenance", Assignment::Whole(Bucket::Need)),
    ("emi", Assignment::Whole(Bucket::Need)),
    ("entertainment", Assignment::Whole(Bucket::Want)),
    ("grooming", Assignment::Whole(Bucket::Want)),
    ("trip/vacation", Assignment::Whole(Bucket::Want)),
    ("gifts", Assignment::Whole(Bucket::Want)),
    ("self improvement", Assignment::Whole(Bucket::Want)),
    ("withdrawal", Assignment::Whole(Bucket::Want)),
    ("investment", Assignment::Whole(Bucket::Investment)),
    ("others", Assignment::SplitNeedWant),
];

/// The category row that holds the month's income in the category total sheet.
pub const INCOME_CATEGORY: &str = "income";

/// Lower-cases and trims a category name for matching against `CATEGORY_BUCKETS`.
pub fn normalize_category(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Looks up the bucket assignment of a category. Matching ignores case and surrounding spaces.
pub fn assignment(category: &str) -> Option<Assignment> {
    let key = normalize_category(category);
    CATEGORY_BUCKETS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, a)| *a)
}
