use strum::{EnumCount, EnumIter};

/// Bitmask of the tables ECMA-335 II.22 requires to be sorted, as written into the `Sorted`
/// field of the tables stream header by conforming producers.
///
/// Covers `InterfaceImpl`, `Constant`, `CustomAttribute`, `FieldMarshal`, `DeclSecurity`,
/// `ClassLayout`, `FieldLayout`, `MethodSemantics`, `MethodImpl`, `ImplMap`, `FieldRVA`,
/// `NestedClass`, `GenericParam` and `GenericParamConstraint`.
pub const SORTED_TABLES: u64 = 0x0000_1600_3301_FA00;

/// Identifiers of the metadata tables this crate emits.
///
/// The discriminant is the ECMA-335 table number, which is also the bit position of the
/// table in the `Valid` and `Sorted` masks of the tables stream header. Iteration order
/// (via [`strum::IntoEnumIterator`]) is table-number order, the order in which row counts
/// and table bodies appear in the stream.
///
/// ## Reference
/// * [ECMA-335 Partition II, Section 22](https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf) - Metadata Tables
#[derive(Clone, Copy, PartialEq, Debug, EnumIter, EnumCount, Eq, Hash)]
pub enum TableId {
    /// `Module` table (0x00) - Exactly one row describing the module itself.
    Module = 0x00,

    /// `ModuleRef` table (0x1A) - References to external modules, by name.
    ModuleRef = 0x1A,
}

impl TableId {
    /// Bit of this table in the `Valid` / `Sorted` masks.
    #[must_use]
    pub fn mask(self) -> u64 {
        1u64 << (self as u64)
    }

    /// High byte of metadata tokens referring to rows of this table.
    #[must_use]
    pub fn token_type(self) -> u32 {
        (self as u32) << 24
    }
}
