//! Test catalog.
//!
//! The autotest suite is a fixed, ordered list of pspautotests names. Each
//! name resolves to an executable image and a golden transcript under the
//! configured memstick root:
//!
//! ```text
//! <root>/pspautotests/tests/<name>.prx        executable image
//! <root>/pspautotests/tests/<name>.expected   golden transcript
//! ```
//!
//! Names may contain path separators; tests are grouped into subdirectories
//! (e.g. `cpu/vfpu/base/vfpu`).

use std::path::{Path, PathBuf};

/// The standard CPU test set, in catalog order.
pub const STANDARD_TESTS: &[&str] = &[
    "cpu/cpu_alu/cpu_alu",
    "cpu/fpu/fpu",
    "cpu/icache/icache",
    "cpu/lsu/lsu",
    "cpu/vfpu/base/vfpu",
    "cpu/vfpu/colors/vfpu_colors",
    "cpu/vfpu/convert/vfpu_convert",
    "cpu/vfpu/prefixes/vfpu_prefixes",
];

/// Directory under the memstick root that holds the test tree.
const TESTS_SUBDIR: &str = "pspautotests/tests";

/// Extension of the executable image.
const IMAGE_EXT: &str = "prx";

/// Extension of the golden transcript.
const EXPECTED_EXT: &str = "expected";

/// A single resolved test case. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDescriptor {
    /// Catalog name, possibly containing path separators.
    pub name: String,
    /// Path to the executable image.
    pub image_path: PathBuf,
    /// Path to the golden transcript.
    pub expected_path: PathBuf,
}

impl TestDescriptor {
    /// Resolve a test name under the given memstick root.
    pub fn resolve(root: &Path, name: &str) -> Self {
        let base = root.join(TESTS_SUBDIR).join(name);
        Self {
            name: name.to_string(),
            image_path: base.with_extension(IMAGE_EXT),
            expected_path: base.with_extension(EXPECTED_EXT),
        }
    }
}

/// Ordered collection of resolved test cases.
#[derive(Debug, Clone, Default)]
pub struct TestCatalog {
    entries: Vec<TestDescriptor>,
}

impl TestCatalog {
    /// The standard CPU test set resolved under `root`.
    pub fn standard(root: &Path) -> Self {
        Self::from_names(root, STANDARD_TESTS.iter().copied())
    }

    /// A catalog of arbitrary test names resolved under `root`.
    pub fn from_names<'a, I>(root: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            entries: names
                .into_iter()
                .map(|name| TestDescriptor::resolve(root, name))
                .collect(),
        }
    }

    /// All entries, in catalog order.
    pub fn entries(&self) -> &[TestDescriptor] {
        &self.entries
    }

    /// Entry at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&TestDescriptor> {
        self.entries.get(index)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
