//! Provider command handlers.

use tabled::Tabled;

use orangebox_core::Provider;

use crate::cli::{GlobalOpts, ResourceArgs, ResourceCommand};
use crate::error::CliError;

use super::resource::{self, Presenter};
use super::{Session, util};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct ProviderRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl Presenter for Provider {
    type Row = ProviderRow;

    fn row(&self) -> ProviderRow {
        ProviderRow {
            id: self.id.to_string(),
            name: self.name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            description: self.description.clone(),
        }
    }

    fn detail(&self) -> String {
        let stamp = |t: Option<chrono::DateTime<chrono::Utc>>| {
            t.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_default()
        };
        util::detail_lines(&[
            ("ID", self.id.to_string()),
            ("Name", self.name.clone()),
            ("Address", self.address.clone()),
            ("Phone", self.phone.clone()),
            ("Description", self.description.clone()),
            ("Created", stamp(self.created_at)),
            ("Updated", stamp(self.updated_at)),
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
        ResourceCommand::List(list) => resource::list::<Provider>(session, list, global).await,
        ResourceCommand::Get { id } => resource::get::<Provider>(session, id, global).await,
        ResourceCommand::Add(fields) => resource::add::<Provider>(session, &fields, global).await,
        ResourceCommand::Edit { id, fields } => {
            resource::edit::<Provider>(session, id, &fields, global).await
        }
        ResourceCommand::Delete { id } => resource::delete::<Provider>(session, id, global).await,
    }
}
