//! Screens: one table screen per resource, plus the form overlay they share.

pub mod form;
pub mod list;

use orangebox_core::{
    DeleteOutcome, FetchOutcome, Product, Provider, Resource, SubmitOutcome,
};
use ratatui::layout::Constraint;

use crate::action::Action;
use crate::screen::ScreenId;

pub use list::ResourceScreen;

/// How one resource is laid out as a table and how its backend results
/// are wrapped for the app loop.
pub trait TableResource: Resource {
    const SCREEN: ScreenId;

    /// One cell per column, in the order of `Self::SortField::iter()`.
    fn cells(&self) -> Vec<String>;

    /// Column widths, same order as [`TableResource::cells`].
    fn widths() -> Vec<Constraint>;

    fn loaded(outcome: FetchOutcome<Self>) -> Action;
    fn deleted(outcome: DeleteOutcome) -> Action;
    fn saved(outcome: SubmitOutcome<Self>) -> Action;
}

impl TableResource for Product {
    const SCREEN: ScreenId = ScreenId::Products;

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format!("{:.2}", self.price),
            self.description.clone(),
            self.stock.to_string(),
            self.provider_name.clone().unwrap_or_else(|| "-".into()),
        ]
    }

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(6),
            Constraint::Fill(2),
            Constraint::Length(10),
            Constraint::Fill(3),
            Constraint::Length(7),
            Constraint::Fill(2),
        ]
    }

    fn loaded(outcome: FetchOutcome<Self>) -> Action {
        Action::ProductsLoaded(outcome)
    }

    fn deleted(outcome: DeleteOutcome) -> Action {
        Action::ProductDeleted(outcome)
    }

    fn saved(outcome: SubmitOutcome<Self>) -> Action {
        Action::ProductSaved(outcome)
    }
}

impl TableResource for Provider {
    const SCREEN: ScreenId = ScreenId::Providers;

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.address.clone(),
            self.phone.clone(),
            self.description.clone(),
        ]
    }

    fn widths() -> Vec<Constraint> {
        vec![
            Constraint::Length(6),
            Constraint::Fill(2),
            Constraint::Fill(3),
            Constraint::Length(16),
            Constraint::Fill(3),
        ]
    }

    fn loaded(outcome: FetchOutcome<Self>) -> Action {
        Action::ProvidersLoaded(outcome)
    }

    fn deleted(outcome: DeleteOutcome) -> Action {
        Action::ProviderDeleted(outcome)
    }

    fn saved(outcome: SubmitOutcome<Self>) -> Action {
        Action::ProviderSaved(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orangebox_core::{EntityId, SortField};
    use pretty_assertions::assert_eq;

    use super::list::sort_columns;

    fn product() -> Product {
        Product {
            id: EntityId::new(4),
            name: "Anvil".into(),
            price: 9.5,
            stock: 3,
            description: String::new(),
            provider_name: None,
            provider_id: None,
        }
    }

    #[test]
    fn product_cells_follow_sort_columns() {
        let cells = product().cells();
        assert_eq!(cells.len(), sort_columns::<<Product as Resource>::SortField>().len());
        assert_eq!(Product::widths().len(), cells.len());
        assert_eq!(cells, vec!["4", "Anvil", "9.50", "", "3", "-"]);
    }

    #[test]
    fn provider_columns_line_up() {
        let columns: Vec<_> = sort_columns::<<Provider as Resource>::SortField>()
            .into_iter()
            .map(SortField::label)
            .collect();
        assert_eq!(columns, vec!["ID", "Name", "Address", "Phone", "Description"]);
        assert_eq!(Provider::widths().len(), columns.len());
    }
}
