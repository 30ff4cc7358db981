use std::{cmp::Ordering, sync::LazyLock};

use icu_collator::{Collator, CollatorBorrowed, options::CollatorOptions};

static ROOT_COLLATOR: LazyLock<CollatorBorrowed<'static>> = LazyLock::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .expect("root collation data to be compiled in")
});

/// Root-locale Unicode collation (tertiary strength, so lowercase sorts
/// before uppercase), falling back to code point order so distinct strings
/// never compare equal.
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    ROOT_COLLATOR
        .compare(left, right)
        .then_with(|| left.cmp(right))
}
