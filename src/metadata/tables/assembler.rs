//! Assembly of the `Module` and `ModuleRef` tables from a configuration mapping.
//!
//! Every key and every value of the mapping is stored in `#Strings` and referenced by one
//! `ModuleRef` row. The rows are interleaved key, value, key, value in mapping order, so a
//! mapping of `N` pairs produces `2N` rows where row `2i` names key `i` and row `2i + 1`
//! names value `i` (0-based). The single `Module` row carries the module name and points all
//! three GUID columns at the empty GUID.
//!
//! Using module references to carry arbitrary text is a deliberate misuse of the table; it
//! keeps the artifact within a fixed, well-known format. The assembler only supports this
//! one shape.

use crate::{
    input::ConfigMapping,
    metadata::{
        streams::{GuidHeapBuilder, StringHeapBuilder},
        tables::{ModuleRefRow, ModuleRow, TableId},
    },
    utils::to_u32,
    Result,
};

/// Largest row id a metadata token can carry (24 bits)
pub const MAX_ROW_ID: u32 = 0x00FF_FFFF;

/// The accumulated tables and heaps, ready for serialization.
#[derive(Debug, Clone)]
pub struct MetadataTables {
    /// The single `Module` row
    pub module: ModuleRow,
    /// The `ModuleRef` rows in insertion order
    pub module_refs: Vec<ModuleRefRow>,
    /// The `#Strings` heap referenced by both tables
    pub strings: StringHeapBuilder,
    /// The `#GUID` heap referenced by the `Module` row
    pub guids: GuidHeapBuilder,
}

/// Builds the `Module` and `ModuleRef` tables while registering their strings.
///
/// The assembler owns the heap builders it fills; [`ModuleTableAssembler::into_tables`]
/// hands everything over to the serializer and ends the accumulating phase.
///
/// # Examples
///
/// ```rust
/// use configmeta::{metadata::tables::ModuleTableAssembler, ConfigMapping};
///
/// let mapping = ConfigMapping::from_pairs([("a", "1"), ("b", "2")])?;
/// let assembler = ModuleTableAssembler::from_mapping(&mapping, "")?;
///
/// let names: Vec<u32> = assembler.module_refs().iter().map(|row| row.name).collect();
/// assert_eq!(names, [1, 3, 5, 7]);
/// # Ok::<(), configmeta::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModuleTableAssembler {
    strings: StringHeapBuilder,
    guids: GuidHeapBuilder,
    module: Option<ModuleRow>,
    module_refs: Vec<ModuleRefRow>,
}

impl ModuleTableAssembler {
    /// Creates an assembler with empty tables and heaps.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds both tables for `mapping`: one `Module` row named `module_name`, then a key
    /// row and a value row per pair, in mapping order.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if a string cannot be stored or the table grows
    /// beyond the row id range.
    pub fn from_mapping(mapping: &ConfigMapping, module_name: &str) -> Result<Self> {
        let mut assembler = Self::new();
        assembler.add_module(module_name)?;

        for (key, value) in mapping.iter() {
            assembler.add_module_ref(key)?;
            assembler.add_module_ref(value)?;
        }

        log::debug!(
            "assembled {} ModuleRef rows from {} properties",
            assembler.module_refs.len(),
            mapping.len()
        );
        Ok(assembler)
    }

    /// Appends the `Module` row and returns its row id (always 1).
    ///
    /// The name may be empty, in which case the row points at the reserved empty string.
    /// The module version id and both edit-and-continue ids reference the empty GUID.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if the module row was already added or the name
    /// cannot be stored.
    pub fn add_module(&mut self, name: &str) -> Result<u32> {
        if self.module.is_some() {
            return Err(layout_error!("The Module table holds exactly one row"));
        }

        let name = self.strings.intern(name)?;
        let empty_guid = self.guids.intern(uguid::Guid::ZERO)?;

        self.module = Some(ModuleRow {
            generation: 0,
            name,
            mvid: empty_guid,
            encid: empty_guid,
            encbaseid: empty_guid,
        });
        Ok(1)
    }

    /// Appends a `ModuleRef` row naming `name` and returns its 1-based row id.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if the name cannot be stored or the table is full.
    pub fn add_module_ref(&mut self, name: &str) -> Result<u32> {
        let rid = to_u32(self.module_refs.len() + 1)?;
        if rid > MAX_ROW_ID {
            return Err(layout_error!("ModuleRef table exceeds {} rows", MAX_ROW_ID));
        }

        let name = self.strings.intern(name)?;
        self.module_refs.push(ModuleRefRow { name });

        log::trace!(
            "ModuleRef {:#010x} -> #Strings[{:#x}]",
            TableId::ModuleRef.token_type() | rid,
            name
        );
        Ok(rid)
    }

    /// The `Module` row, if it has been added
    #[must_use]
    pub fn module(&self) -> Option<&ModuleRow> {
        self.module.as_ref()
    }

    /// The `ModuleRef` rows in insertion order
    #[must_use]
    pub fn module_refs(&self) -> &[ModuleRefRow] {
        &self.module_refs
    }

    /// The `#Strings` heap built so far
    #[must_use]
    pub fn strings(&self) -> &StringHeapBuilder {
        &self.strings
    }

    /// The `#GUID` heap built so far
    #[must_use]
    pub fn guids(&self) -> &GuidHeapBuilder {
        &self.guids
    }

    /// Ends the accumulating phase and hands rows and heaps to the serializer.
    ///
    /// # Errors
    /// Returns [`crate::Error::LayoutFailed`] if no `Module` row has been added.
    pub fn into_tables(self) -> Result<MetadataTables> {
        let module = self
            .module
            .ok_or_else(|| layout_error!("The Module table has no row"))?;

        Ok(MetadataTables {
            module,
            module_refs: self.module_refs,
            strings: self.strings,
            guids: self.guids,
        })
    }
}
