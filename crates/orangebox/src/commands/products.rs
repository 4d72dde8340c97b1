//! Product command handlers.

use tabled::Tabled;

use orangebox_core::Product;

use crate::cli::{GlobalOpts, ResourceArgs, ResourceCommand};
use crate::error::CliError;

use super::resource::{self, Presenter};
use super::{Session, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Stock")]
    stock: String,
    #[tabled(rename = "Provider")]
    provider: String,
}

impl Presenter for Product {
    type Row = ProductRow;

    fn row(&self) -> ProductRow {
        ProductRow {
            id: self.id.to_string(),
            name: self.name.clone(),
            price: format!("{:.2}", self.price),
            description: self.description.clone(),
            stock: self.stock.to_string(),
            provider: self.provider_name.clone().unwrap_or_default(),
        }
    }

    fn detail(&self) -> String {
        util::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Price", format!("{:.2}", self.price)),
            ("Stock", self.stock.to_string()),
            ("Description", self.description.clone()),
            (
                "Provider",
                match (&self.provider_name, self.provider_id) {
                    (Some(name), Some(id)) => format!("{name} ({id})"),
                    (None, Some(id)) => id.to_string(),
                    (Some(name), None) => name.clone(),
                    (None, None) => String::new(),
                },
            ),
        ])
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    session: &Session,
    args: ResourceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ResourceCommand::List(list) => resource::list::<Product>(session, list, global).await,
        ResourceCommand::Get { id } => resource::get::<Product>(session, id, global).await,
        ResourceCommand::Add(fields) => resource::add::<Product>(session, &fields, global).await,
        ResourceCommand::Edit { id, fields } => {
            resource::edit::<Product>(session, id, &fields, global).await
        }
        ResourceCommand::Delete { id } => resource::delete::<Product>(session, id, global).await,
    }
}
