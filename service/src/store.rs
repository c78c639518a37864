//! In-process application [`State`] and its reducer.
//!
//! All the UI-facing state lives in a single [`State`] value mutated only by
//! [`State::apply()`] over [`Action`]s, so every transition is a pure,
//! individually testable function. [`Store`] is the shared handle commands
//! dispatch through.

use std::sync::Arc;

use tokio::sync::{Mutex, Notify};

use crate::domain::{
    contract::{self, validation, Violation},
    Contract,
};

/// Whole application state.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// Contracts visible to the signed-in user, in storage order.
    pub contracts: Vec<Contract>,

    /// Currently reported uniqueness [`Violation`]s.
    pub violations: Vec<Violation>,

    /// Inline editing status.
    pub edit: Edit,

    /// Indicates that [`State::contracts`] is stale and must be re-listed
    /// from storage.
    pub needs_refresh: bool,
}

/// Inline editing status of the contract listing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Edit {
    /// No cell is being edited.
    #[default]
    Viewing,

    /// A single cell is being edited.
    Editing {
        /// [`Contract`] the edited cell belongs to.
        contract_id: contract::Id,

        /// [`Field`](contract::Field) being edited.
        field: contract::Field,
    },
}

/// Transition of the application [`State`].
#[derive(Clone, Debug)]
pub enum Action {
    /// Fresh contract listing arrived from storage.
    ContractsLoaded(Vec<Contract>),

    /// Single [`Contract`] was inserted or updated in storage.
    ContractSaved(Contract),

    /// Single [`Contract`] was deleted from storage.
    ContractRemoved(contract::Id),

    /// Uniqueness sweep finished for the given [`Contract`], replacing its
    /// previously reported [`Violation`]s.
    ViolationsReported {
        /// [`Contract`] the sweep ran for.
        contract_id: contract::Id,

        /// Detected [`Violation`]s, possibly none.
        violations: Vec<Violation>,
    },

    /// Single [`Violation`] was dismissed.
    ViolationCleared {
        /// [`Contract`] the [`Violation`] was reported for.
        contract_id: contract::Id,

        /// [`validation::Key`] of the dismissed [`Violation`].
        key: validation::Key,
    },

    /// Inline editing of a cell started.
    EditStarted {
        /// [`Contract`] the cell belongs to.
        contract_id: contract::Id,

        /// [`Field`](contract::Field) of the cell.
        field: contract::Field,
    },

    /// Inline editing finished without saving.
    EditCancelled,

    /// Inline editing finished and the edit was persisted.
    EditCommitted,

    /// Stored contracts changed, so the listing must be refreshed.
    RefreshRequested,
}

impl State {
    /// Applies the given [`Action`] to this [`State`].
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::ContractsLoaded(contracts) => {
                self.contracts = contracts;
                self.needs_refresh = false;
            }
            Action::ContractSaved(contract) => {
                if let Some(stored) = self
                    .contracts
                    .iter_mut()
                    .find(|c| c.id == contract.id)
                {
                    *stored = contract;
                } else {
                    self.contracts.push(contract);
                }
            }
            Action::ContractRemoved(id) => {
                self.contracts.retain(|c| c.id != id);
                self.violations.retain(|v| v.contract_id != id);
            }
            Action::ViolationsReported {
                contract_id,
                violations,
            } => {
                self.violations.retain(|v| v.contract_id != contract_id);
                self.violations.extend(violations);
            }
            Action::ViolationCleared { contract_id, key } => {
                self.violations.retain(|v| {
                    !(v.contract_id == contract_id && v.key == key)
                });
            }
            Action::EditStarted { contract_id, field } => {
                self.edit = Edit::Editing { contract_id, field };
                // Starting to retype a conflicting value dismisses its
                // highlight until the next sweep.
                if let Some(key) = field.business_key() {
                    self.apply(Action::ViolationCleared { contract_id, key });
                }
            }
            Action::EditCancelled | Action::EditCommitted => {
                self.edit = Edit::Viewing;
            }
            Action::RefreshRequested => {
                self.needs_refresh = true;
            }
        }
    }
}

/// Shared handle to the application [`State`].
///
/// Cheap to clone. Dispatching is serialized, and refresh demand is signaled
/// to the background lister via [`Store::refresh_needed()`].
#[derive(Clone, Debug, Default)]
pub struct Store(Arc<Shared>);

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<State>,
    refresh: Notify,
}

impl Store {
    /// Creates a new empty [`Store`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the given [`Action`] to the shared [`State`].
    pub async fn dispatch(&self, action: Action) {
        let mut state = self.0.state.lock().await;
        state.apply(action);
        if state.needs_refresh {
            self.0.refresh.notify_one();
        }
    }

    /// Returns a snapshot of the current [`State`].
    pub async fn snapshot(&self) -> State {
        self.0.state.lock().await.clone()
    }

    /// Waits until a refresh of the contract listing is demanded.
    ///
    /// A demand raised while nobody is waiting is remembered and completes
    /// the next call immediately.
    pub async fn refresh_needed(&self) {
        self.0.refresh.notified().await;
    }
}
