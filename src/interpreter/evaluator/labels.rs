use std::collections::HashMap;

use crate::{
    error::SemanticError,
    interpreter::token::{Position, Token, TokenKind},
};

/// The token range a labeled section occupies.
///
/// `start` is the index of the `SECTION` token and `end` the index of its
/// terminator, so the body is `start + 1..end`. A taken `JUMP` records its
/// label before the section is found, leaving both ends unset until then.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowRange {
    pub start: Option<usize>,
    pub end:   Option<usize>,
}

/// The flow-control table: label name to section range.
///
/// Entries are added as `JUMP` and `SECTION` tokens are met during the linear
/// walk over the program, so only forward jumps can be resolved. Finding a
/// section goes through [`LabelIndex::scan_forward`] alone, which keeps the
/// linear scan swappable for a pre-computed index.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    entries: HashMap<String, FlowRange>,
}

impl LabelIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_defined(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&FlowRange> {
        self.entries.get(label)
    }

    /// Records a label.
    ///
    /// # Errors
    /// `SemanticError::DuplicateLabel` if the label is already recorded.
    pub fn define(&mut self,
                  label: &str,
                  range: FlowRange,
                  at: Position)
                  -> Result<(), SemanticError> {
        if self.is_defined(label) {
            return Err(SemanticError::DuplicateLabel { label: label.to_string(),
                                                       at });
        }

        self.entries.insert(label.to_string(), range);
        Ok(())
    }

    /// Fills in the range of a label recorded by a jump.
    pub fn resolve(&mut self, label: &str, start: usize, end: usize) {
        if let Some(range) = self.entries.get_mut(label) {
            range.start = Some(start);
            range.end = Some(end);
        }
    }

    /// Finds the index of the `SECTION` token carrying `label`, looking only
    /// at tokens from `from` onwards.
    #[must_use]
    pub fn scan_forward(tokens: &[Token], from: usize, label: &str) -> Option<usize> {
        tokens.iter()
              .enumerate()
              .skip(from)
              .find(|(_, token)| token.kind == TokenKind::Section && token.name() == Some(label))
              .map(|(index, _)| index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
