//! Framework panel workflow: pick a framework, toggle its sections, apply it.
//!
//! The session only tracks selection state. Documents are passed in and new
//! documents handed back; the caller loads them into its editor.

use std::collections::BTreeMap;

use promptframe_core::model::Document;
use promptframe_registry::{Framework, FrameworkId, Registry, SectionKey};

use crate::apply::{ApplyMode, apply_framework};
use crate::reconcile::{RemovalConfirmer, reconcile};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown framework '{0}'")]
    UnknownFramework(FrameworkId),
    #[error("no framework selected")]
    NoFrameworkSelected,
    #[error("no pending apply to commit")]
    NothingPending,
}

/// Outcome of a section toggle or reset.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUpdate {
    /// Framework not applied yet; only the selection changed.
    SelectionOnly,
    /// The document was reconciled; load this one.
    Rewritten(Document),
    /// A removal was declined; selection and document are unchanged.
    Declined,
}

/// Outcome of [`FrameworkSession::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyDecision {
    /// The document had no text and was replaced.
    Applied(Document),
    /// The document has content; call `commit_apply` with a mode.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingApply {
    pub framework: FrameworkId,
    pub section_keys: Vec<SectionKey>,
}

#[derive(Debug, Clone)]
pub struct FrameworkSession<'r> {
    registry: &'r Registry,
    framework: Option<&'r Framework>,
    selected: Vec<SectionKey>,
    applied: bool,
    pending: Option<PendingApply>,
}

impl<'r> FrameworkSession<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            framework: None,
            selected: Vec::new(),
            applied: false,
            pending: None,
        }
    }

    pub fn framework(&self) -> Option<&'r Framework> {
        self.framework
    }

    /// Selected section keys, in the framework's order.
    pub fn selected_keys(&self) -> &[SectionKey] {
        &self.selected
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn pending(&self) -> Option<&PendingApply> {
        self.pending.as_ref()
    }

    /// Select a framework (loading its defaults) or clear the selection.
    pub fn select_framework(&mut self, id: Option<&FrameworkId>) -> Result<(), SessionError> {
        let framework = match id {
            None => None,
            Some(id) => Some(
                self.registry
                    .framework(id)
                    .ok_or_else(|| SessionError::UnknownFramework(id.clone()))?,
            ),
        };

        self.selected = framework
            .map(|f| self.registry.default_enabled_keys(f))
            .unwrap_or_default();
        self.framework = framework;
        self.applied = false;
        self.pending = None;
        Ok(())
    }

    /// Enable or disable one section.
    ///
    /// Once the framework is applied, the document is reconciled right away.
    pub fn toggle_section<C>(
        &mut self,
        document: &Document,
        key: &SectionKey,
        enabled: bool,
        confirmer: &mut C,
    ) -> Result<SessionUpdate, SessionError>
    where
        C: RemovalConfirmer + ?Sized,
    {
        let framework = self.framework.ok_or(SessionError::NoFrameworkSelected)?;

        let mut next = self.selected.clone();
        next.retain(|k| k != key);
        if enabled {
            next.push(key.clone());
        }
        let ordered = self.registry.canonical_order(framework, &next);

        self.sync_to(document, framework, ordered, confirmer)
    }

    /// Go back to the framework's default sections.
    pub fn reset_defaults<C>(
        &mut self,
        document: &Document,
        confirmer: &mut C,
    ) -> Result<SessionUpdate, SessionError>
    where
        C: RemovalConfirmer + ?Sized,
    {
        let framework = self.framework.ok_or(SessionError::NoFrameworkSelected)?;
        let defaults = self.registry.default_enabled_keys(framework);

        self.sync_to(document, framework, defaults, confirmer)
    }

    fn sync_to<C>(
        &mut self,
        document: &Document,
        framework: &Framework,
        keys: Vec<SectionKey>,
        confirmer: &mut C,
    ) -> Result<SessionUpdate, SessionError>
    where
        C: RemovalConfirmer + ?Sized,
    {
        if !self.applied {
            self.selected = keys;
            return Ok(SessionUpdate::SelectionOnly);
        }

        let result = reconcile(self.registry, document, framework, &keys, confirmer);
        if !result.applied {
            return Ok(SessionUpdate::Declined);
        }

        self.selected = keys;
        Ok(SessionUpdate::Rewritten(result.document))
    }

    /// Apply the selected sections.
    ///
    /// A document without text is replaced outright. Otherwise the request is
    /// parked until the caller picks a mode with [`Self::commit_apply`].
    pub fn apply(&mut self, document: &Document) -> Result<ApplyDecision, SessionError> {
        let framework = self.framework.ok_or(SessionError::NoFrameworkSelected)?;
        let keys = self.registry.canonical_order(framework, &self.selected);

        if !document.has_text() {
            let next = apply_framework(self.registry, document, framework, &keys, ApplyMode::Replace);
            self.applied = true;
            self.pending = None;
            return Ok(ApplyDecision::Applied(next));
        }

        self.pending = Some(PendingApply {
            framework: framework.id.clone(),
            section_keys: keys,
        });
        Ok(ApplyDecision::Pending)
    }

    pub fn commit_apply(
        &mut self,
        document: &Document,
        mode: ApplyMode,
    ) -> Result<Document, SessionError> {
        let pending = self.pending.take().ok_or(SessionError::NothingPending)?;
        let framework = self
            .registry
            .framework(&pending.framework)
            .ok_or_else(|| SessionError::UnknownFramework(pending.framework.clone()))?;

        let next = apply_framework(self.registry, document, framework, &pending.section_keys, mode);
        self.applied = true;
        Ok(next)
    }

    pub fn cancel_apply(&mut self) {
        self.pending = None;
    }

    /// Label → helper text for the current framework.
    pub fn helper_map(&self) -> BTreeMap<String, String> {
        self.registry.helper_map(self.framework)
    }
}
