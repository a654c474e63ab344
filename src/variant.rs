use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{DirectBucketStore, LinkedSortedStore, SortedArrayStore, Store};

/// The container implementations the benchmark knows how to build.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Variant {
    SortedArray,
    DirectBucket,
    LinkedSorted,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown store variant `{0}` (expected sorted_array, direct_bucket or linked_sorted)")]
pub struct VariantParseError(pub String);

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::SortedArray,
        Variant::DirectBucket,
        Variant::LinkedSorted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::SortedArray => "sorted_array",
            Variant::DirectBucket => "direct_bucket",
            Variant::LinkedSorted => "linked_sorted",
        }
    }

    /// Fresh, empty store of this kind.
    pub fn build(self) -> Box<dyn Store> {
        match self {
            Variant::SortedArray => Box::new(SortedArrayStore::new()),
            Variant::DirectBucket => Box::new(DirectBucketStore::new()),
            Variant::LinkedSorted => Box::new(LinkedSortedStore::new()),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = VariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase().replace('-', "_");
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| VariantParseError(s.to_owned()))
    }
}
