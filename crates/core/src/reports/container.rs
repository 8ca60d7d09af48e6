//! Balance containers: account leaves and group branches.

use std::fmt;
use std::sync::Arc;

use ledgerlens_shared::types::{Amount, Periodicity};
use once_cell::sync::OnceCell;

use super::balance::Balance;
use super::figures::{FigureSource, ReportContext, figure_accessors};
use super::snapshot::{
    AccountSnapshot, BalanceFigures, BalanceSnapshot, ContainerSnapshot, GroupSnapshot,
};
use crate::book::Book;
use crate::table::BalancesDataTableBuilder;

enum Node {
    Account(Arc<AccountSnapshot>),
    Group {
        snapshot: Arc<GroupSnapshot>,
        /// Child groups followed by child accounts, built on first access.
        children: OnceCell<Vec<BalancesContainer>>,
    },
}

/// The balances of an account or a group of accounts.
///
/// Containers are immutable views over a snapshot. A group materializes its
/// child containers once, on first access, and hands out the same instances
/// afterwards.
pub struct BalancesContainer {
    context: Arc<ReportContext>,
    node: Node,
}

impl BalancesContainer {
    pub(crate) fn new(context: Arc<ReportContext>, snapshot: ContainerSnapshot) -> Self {
        let node = match snapshot {
            ContainerSnapshot::Account(account) => Node::Account(account),
            ContainerSnapshot::Group(group) => Node::Group {
                snapshot: group,
                children: OnceCell::new(),
            },
        };
        Self { context, node }
    }

    /// Account or group name.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.node {
            Node::Account(account) => &account.name,
            Node::Group { snapshot, .. } => &snapshot.name,
        }
    }

    /// Credit nature. For groups this is supplied upstream and is `false`
    /// when descendants have mixed natures.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        match &self.node {
            Node::Account(account) => account.credit,
            Node::Group { snapshot, .. } => snapshot.credit,
        }
    }

    /// Whether this is a permanent (balance sheet) account. Always `false` for groups.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        match &self.node {
            Node::Account(account) => account.permanent,
            Node::Group { .. } => false,
        }
    }

    /// True for account leaves.
    #[must_use]
    pub fn is_from_account(&self) -> bool {
        matches!(self.node, Node::Account(_))
    }

    /// True for group branches.
    #[must_use]
    pub fn is_from_group(&self) -> bool {
        matches!(self.node, Node::Group { .. })
    }

    /// True for a group that has at least one child group.
    #[must_use]
    pub fn is_from_parent_group(&self) -> bool {
        match &self.node {
            Node::Account(_) => false,
            Node::Group { snapshot, .. } => !snapshot.groups.is_empty(),
        }
    }

    /// The book of the owning report.
    #[must_use]
    pub fn book(&self) -> &dyn Book {
        self.context.book.as_ref()
    }

    /// The periodicity of the owning report.
    #[must_use]
    pub fn periodicity(&self) -> Periodicity {
        self.context.periodicity
    }

    figure_accessors!();

    /// Dated balances, oldest first. Empty when none were recorded.
    #[must_use]
    pub fn balances(&self) -> Vec<Balance<'_>> {
        self.balance_snapshots()
            .iter()
            .map(|snapshot| Balance::new(self, snapshot))
            .collect()
    }

    /// Child containers: groups first, then accounts. Always empty for accounts.
    #[must_use]
    pub fn balances_containers(&self) -> &[BalancesContainer] {
        match &self.node {
            Node::Account(_) => &[],
            Node::Group { snapshot, children } => {
                children.get_or_init(|| self.materialize(snapshot))
            }
        }
    }

    /// Creates a table builder over this account, or over the children of this group.
    #[must_use]
    pub fn create_data_table(&self) -> BalancesDataTableBuilder<'_> {
        let containers = match &self.node {
            Node::Account(_) => vec![self],
            Node::Group { .. } => self.balances_containers().iter().collect(),
        };
        BalancesDataTableBuilder::new(self.book(), self.periodicity(), containers)
    }

    /// Depth-first search for a container named `name`, starting with this one.
    pub(crate) fn find(&self, name: &str) -> Option<&BalancesContainer> {
        if self.name() == name {
            return Some(self);
        }
        self.balances_containers()
            .iter()
            .find_map(|child| child.find(name))
    }

    pub(crate) fn balance_snapshots(&self) -> &[BalanceSnapshot] {
        match &self.node {
            Node::Account(account) => &account.balances,
            Node::Group { snapshot, .. } => &snapshot.balances,
        }
    }

    fn materialize(&self, group: &GroupSnapshot) -> Vec<BalancesContainer> {
        let children: Vec<_> = group
            .groups
            .iter()
            .map(|child| ContainerSnapshot::Group(Arc::clone(child)))
            .chain(
                group
                    .accounts
                    .iter()
                    .map(|child| ContainerSnapshot::Account(Arc::clone(child))),
            )
            .map(|snapshot| Self::new(Arc::clone(&self.context), snapshot))
            .collect();
        tracing::debug!(
            group = %group.name,
            groups = group.groups.len(),
            accounts = group.accounts.len(),
            "materialized child containers"
        );
        children
    }
}

impl FigureSource for BalancesContainer {
    fn context(&self) -> &ReportContext {
        &self.context
    }

    fn figures(&self) -> &BalanceFigures {
        match &self.node {
            Node::Account(account) => &account.figures,
            Node::Group { snapshot, .. } => &snapshot.figures,
        }
    }

    fn credit_nature(&self) -> bool {
        self.is_credit()
    }
}

impl fmt::Debug for BalancesContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalancesContainer")
            .field("name", &self.name())
            .field("group", &self.is_from_group())
            .field("credit", &self.is_credit())
            .finish_non_exhaustive()
    }
}
