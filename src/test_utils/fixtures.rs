use std::path::PathBuf;

use tempfile::TempDir;

use crate::taxonomy::OccupationEntry;

/// A small taxonomy covering several major groups.
#[must_use]
pub fn sample_entries() -> Vec<OccupationEntry> {
    vec![
        OccupationEntry::new("15-1252", "Software Developers")
            .with_major_group("Computer and Mathematical")
            .with_minor_group("Computer Occupations")
            .with_broad_group("Software and Web Developers, Programmers, and Testers"),
        OccupationEntry::new("15-2051", "Data Scientists")
            .with_major_group("Computer and Mathematical")
            .with_minor_group("Mathematical Science Occupations"),
        OccupationEntry::new("29-1141", "Registered Nurses")
            .with_major_group("Healthcare Practitioners and Technical")
            .with_minor_group("Health Diagnosing and Treating Practitioners"),
        OccupationEntry::new("29-1171", "Nurse Practitioners")
            .with_major_group("Healthcare Practitioners and Technical")
            .with_minor_group("Health Diagnosing and Treating Practitioners"),
        OccupationEntry::new("25-2021", "Elementary School Teachers, Except Special Education")
            .with_major_group("Educational Instruction and Library"),
        OccupationEntry::new("17-2141", "Mechanical Engineers")
            .with_major_group("Architecture and Engineering")
            .with_minor_group("Engineers"),
        OccupationEntry::new("13-2011", "Accountants and Auditors")
            .with_major_group("Business and Financial Operations"),
    ]
}

/// `sample_entries` as taxonomy JSON.
#[must_use]
pub fn sample_taxonomy_json() -> String {
    serde_json::to_string_pretty(&sample_entries()).unwrap_or_default()
}

/// Test fixture providing isolated filesystem environment.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl UnitTestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {}", data_path.display());

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a test file with content.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {} ({} bytes)",
            full_path.display(),
            content.len()
        );
        full_path
    }

    /// Write the sample taxonomy to `taxonomy.json`.
    pub fn create_taxonomy(&self) -> PathBuf {
        self.create_file("taxonomy.json", &sample_taxonomy_json())
    }

    /// Write a programs file.
    pub fn create_programs(&self, content: &str) -> PathBuf {
        self.create_file("programs.json", content)
    }
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!(
            "[FIXTURE] Cleaning up temp directory: {}",
            self.data_path.display()
        );
    }
}
