//! Study metadata for human-readable names
//!
//! `StudyMetadata` provides bidirectional mappings between string names
//! and IDs for NCPs, stakeholder groups, forest types and indicators.
//! Pipeline errors carry IDs; callers resolve them to names here when
//! presenting results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{ForestTypeId, GroupId, IndicatorId, NcpId};

/// Metadata entry for any study entity
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EntityMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Holds human-readable names for study entities, along with reverse
/// mappings for name-based lookups in the builder DSL.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudyMetadata {
    /// NCP ID to metadata mapping
    pub ncps: HashMap<NcpId, EntityMetadata>,
    /// Stakeholder group ID to metadata mapping
    pub groups: HashMap<GroupId, EntityMetadata>,
    /// Forest type ID to metadata mapping
    pub forest_types: HashMap<ForestTypeId, EntityMetadata>,
    /// Indicator ID to metadata mapping
    pub indicators: HashMap<IndicatorId, EntityMetadata>,

    /// Name to NCP ID reverse lookup
    #[serde(default)]
    pub ncp_names: HashMap<String, NcpId>,
    /// Name to group ID reverse lookup
    #[serde(default)]
    pub group_names: HashMap<String, GroupId>,
    /// Name to forest type ID reverse lookup
    #[serde(default)]
    pub forest_type_names: HashMap<String, ForestTypeId>,
    /// Name to indicator ID reverse lookup
    #[serde(default)]
    pub indicator_names: HashMap<String, IndicatorId>,
}

impl StudyMetadata {
    /// Create a new empty metadata instance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an NCP with optional name and description
    pub fn register_ncp(&mut self, id: NcpId, name: Option<String>, description: Option<String>) {
        if let Some(ref n) = name {
            self.ncp_names.insert(n.clone(), id);
        }
        self.ncps.insert(id, EntityMetadata { name, description });
    }

    /// Register a stakeholder group with optional name and description
    pub fn register_group(
        &mut self,
        id: GroupId,
        name: Option<String>,
        description: Option<String>,
    ) {
        if let Some(ref n) = name {
            self.group_names.insert(n.clone(), id);
        }
        self.groups.insert(id, EntityMetadata { name, description });
    }

    /// Register a forest type with optional name and description
    pub fn register_forest_type(
        &mut self,
        id: ForestTypeId,
        name: Option<String>,
        description: Option<String>,
    ) {
        if let Some(ref n) = name {
            self.forest_type_names.insert(n.clone(), id);
        }
        self.forest_types
            .insert(id, EntityMetadata { name, description });
    }

    /// Register an indicator with optional name and description
    pub fn register_indicator(
        &mut self,
        id: IndicatorId,
        name: Option<String>,
        description: Option<String>,
    ) {
        if let Some(ref n) = name {
            self.indicator_names.insert(n.clone(), id);
        }
        self.indicators
            .insert(id, EntityMetadata { name, description });
    }

    /// Look up an NCP ID by name
    #[must_use]
    pub fn ncp_id(&self, name: &str) -> Option<NcpId> {
        self.ncp_names.get(name).copied()
    }

    /// Look up a group ID by name
    #[must_use]
    pub fn group_id(&self, name: &str) -> Option<GroupId> {
        self.group_names.get(name).copied()
    }

    /// Look up a forest type ID by name
    #[must_use]
    pub fn forest_type_id(&self, name: &str) -> Option<ForestTypeId> {
        self.forest_type_names.get(name).copied()
    }

    /// Look up an indicator ID by name
    #[must_use]
    pub fn indicator_id(&self, name: &str) -> Option<IndicatorId> {
        self.indicator_names.get(name).copied()
    }

    /// Get the name of an NCP by ID
    #[must_use]
    pub fn ncp_name(&self, id: NcpId) -> Option<&str> {
        self.ncps.get(&id).and_then(|m| m.name.as_deref())
    }

    /// Get the name of a group by ID
    #[must_use]
    pub fn group_name(&self, id: GroupId) -> Option<&str> {
        self.groups.get(&id).and_then(|m| m.name.as_deref())
    }

    /// Get the name of a forest type by ID
    #[must_use]
    pub fn forest_type_name(&self, id: ForestTypeId) -> Option<&str> {
        self.forest_types.get(&id).and_then(|m| m.name.as_deref())
    }

    /// Get the name of an indicator by ID
    #[must_use]
    pub fn indicator_name(&self, id: IndicatorId) -> Option<&str> {
        self.indicators.get(&id).and_then(|m| m.name.as_deref())
    }
}
