//! The balances report: root of the container tree.

use std::fmt;
use std::sync::Arc;

use ledgerlens_shared::types::Periodicity;

use super::container::BalancesContainer;
use super::error::ReportError;
use super::figures::ReportContext;
use super::snapshot::{AccountSnapshot, ContainerSnapshot, GroupSnapshot};
use super::wire::ReportPayload;
use crate::book::Book;
use crate::table::BalancesDataTableBuilder;

/// Balances of a book for one periodicity.
///
/// Owns the top-level containers and is the single source of book context
/// for all of them.
pub struct BalancesReport {
    context: Arc<ReportContext>,
    containers: Vec<BalancesContainer>,
}

impl BalancesReport {
    /// Builds a report from already validated snapshots, kept in the given order.
    #[must_use]
    pub fn new(
        book: Arc<dyn Book>,
        periodicity: Periodicity,
        snapshots: impl IntoIterator<Item = ContainerSnapshot>,
    ) -> Self {
        let context = Arc::new(ReportContext { book, periodicity });
        let containers: Vec<_> = snapshots
            .into_iter()
            .map(|snapshot| BalancesContainer::new(Arc::clone(&context), snapshot))
            .collect();
        tracing::debug!(
            %periodicity,
            containers = containers.len(),
            "built balances report"
        );
        Self {
            context,
            containers,
        }
    }

    /// Validates a wire payload and builds a report from it.
    ///
    /// Top-level groups come first, then top-level accounts. The payload's
    /// periodicity wins over the book default.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] for the first snapshot that violates the
    /// data contract, e.g. a missing credit nature.
    pub fn from_payload(book: Arc<dyn Book>, payload: ReportPayload) -> Result<Self, ReportError> {
        let periodicity = payload.periodicity.unwrap_or_else(|| book.periodicity());
        let mut snapshots = Vec::new();
        for group in payload.group_balances.unwrap_or_default() {
            snapshots.push(GroupSnapshot::try_from(group)?.into());
        }
        for account in payload.account_balances.unwrap_or_default() {
            snapshots.push(AccountSnapshot::try_from(account)?.into());
        }
        Ok(Self::new(book, periodicity, snapshots))
    }

    /// The book the report belongs to.
    #[must_use]
    pub fn book(&self) -> &dyn Book {
        self.context.book.as_ref()
    }

    /// The periodicity balances are bucketed with.
    #[must_use]
    pub fn periodicity(&self) -> Periodicity {
        self.context.periodicity
    }

    /// Top-level containers.
    #[must_use]
    pub fn balances_containers(&self) -> &[BalancesContainer] {
        &self.containers
    }

    /// Finds a container by name anywhere in the tree, top level first.
    #[must_use]
    pub fn balances_container(&self, name: &str) -> Option<&BalancesContainer> {
        self.containers
            .iter()
            .find(|container| container.name() == name)
            .or_else(|| {
                self.containers
                    .iter()
                    .find_map(|container| container.find(name))
            })
    }

    /// Creates a table builder over all top-level containers.
    #[must_use]
    pub fn create_data_table(&self) -> BalancesDataTableBuilder<'_> {
        BalancesDataTableBuilder::new(
            self.book(),
            self.periodicity(),
            self.containers.iter().collect(),
        )
    }
}

impl fmt::Debug for BalancesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalancesReport")
            .field("periodicity", &self.context.periodicity)
            .field("containers", &self.containers)
            .finish_non_exhaustive()
    }
}
