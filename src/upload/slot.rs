//! The three document slots every upload request must fill.

use std::fmt;

/// A named document slot in the upload form.
///
/// Each slot owns its multipart field name, the label used in error
/// messages and a short description of the document it expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentSlot {
    /// Documento de Oficialização da Demanda
    Dod,
    /// Estudo Técnico Preliminar
    Etp,
    /// Termo de Referência
    Tr,
}

impl DocumentSlot {
    /// All slots in the fixed order they are checked and reported.
    pub const ALL: [DocumentSlot; 3] = [DocumentSlot::Dod, DocumentSlot::Etp, DocumentSlot::Tr];

    /// Multipart field name carrying this document.
    pub fn field_name(self) -> &'static str {
        match self {
            DocumentSlot::Dod => "dod",
            DocumentSlot::Etp => "etp",
            DocumentSlot::Tr => "tr",
        }
    }

    /// Label used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            DocumentSlot::Dod => "DOD",
            DocumentSlot::Etp => "ETP",
            DocumentSlot::Tr => "TR",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            DocumentSlot::Dod => "Documento de Oficialização da Demanda",
            DocumentSlot::Etp => "Estudo Técnico Preliminar",
            DocumentSlot::Tr => "Termo de Referência",
        }
    }

    /// Look up the slot for a multipart field name (exact match).
    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.field_name() == name)
    }

    fn index(self) -> usize {
        match self {
            DocumentSlot::Dod => 0,
            DocumentSlot::Etp => 1,
            DocumentSlot::Tr => 2,
        }
    }
}

impl fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed-size storage keyed by slot.
#[derive(Debug, Clone)]
pub(crate) struct SlotMap<T> {
    entries: [Option<T>; 3],
}

impl<T> Default for SlotMap<T> {
    fn default() -> Self {
        Self {
            entries: [None, None, None],
        }
    }
}

impl<T> SlotMap<T> {
    pub(crate) fn insert(&mut self, slot: DocumentSlot, value: T) -> Option<T> {
        self.entries[slot.index()].replace(value)
    }

    pub(crate) fn get(&self, slot: DocumentSlot) -> Option<&T> {
        self.entries[slot.index()].as_ref()
    }

    pub(crate) fn take(&mut self, slot: DocumentSlot) -> Option<T> {
        self.entries[slot.index()].take()
    }
}
