//! Optional download groups
//!
//! A group is a named partition of the payload that the runtime downloads
//! on demand. File names are compared case-insensitively throughout.

use super::validation::ValidationError;

/// One named group and the files assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: String,
    files: Vec<String>,
}

impl Group {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// The assigned spelling of `file_name`, if this group holds it
    pub fn matching_file(&self, file_name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| same_file_name(f, file_name))
            .map(String::as_str)
    }
}

/// Group name → file names, in the order groups were first mentioned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupAssignments {
    groups: Vec<Group>,
}

impl GroupAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `file_name` to `group`, creating the group on first use
    pub fn assign(&mut self, group: &str, file_name: &str) {
        let index = match self.groups.iter().position(|g| g.name == group) {
            Some(index) => index,
            None => {
                self.groups.push(Group {
                    name: group.to_string(),
                    files: Vec::new(),
                });
                self.groups.len() - 1
            }
        };

        let entry = &mut self.groups[index];
        if entry.matching_file(file_name).is_none() {
            entry.files.push(file_name.to_string());
        }
    }

    /// Parse and apply a `Group:File` (or `Group,File`) argument
    pub fn assign_argument(&mut self, argument: &str) -> Result<(), ValidationError> {
        let (group, file_name) = parse_group_argument(argument)?;
        self.assign(group, file_name);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    /// Every assigned file name once (case-insensitively), first-seen order
    pub fn all_files(&self) -> Vec<&str> {
        let mut all: Vec<&str> = Vec::new();
        for group in &self.groups {
            for file in &group.files {
                if !all.iter().any(|seen| same_file_name(seen, file)) {
                    all.push(file);
                }
            }
        }
        all
    }
}

/// Split a group argument at its first `:` or `,`
pub fn parse_group_argument(argument: &str) -> Result<(&str, &str), ValidationError> {
    match argument.split_once([':', ',']) {
        Some((group, file_name)) if !group.trim().is_empty() && !file_name.trim().is_empty() => {
            Ok((group.trim(), file_name.trim()))
        }
        _ => Err(ValidationError::InvalidGroup(argument.to_string())),
    }
}

/// Case-insensitive file-name identity
pub fn same_file_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}
