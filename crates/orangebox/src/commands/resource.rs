//! Handlers shared by every resource: list, get, add, edit, delete.
//!
//! Each one drives the same core controller the TUI uses, so paging,
//! sorting, create/update and the delete confirmation behave identically
//! in both front-ends.

use std::sync::Arc;

use orangebox_core::{
    Draft, Entity, EntityId, FormController, ListController, PromptChoice, QueryState, Resource,
    SortField,
};
use tabled::Tabled;

use crate::cli::{FieldArgs, GlobalOpts, ListArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{Session, util};

/// Table and detail rendering for one resource.
pub trait Presenter: Resource {
    type Row: Tabled;

    fn row(&self) -> Self::Row;
    fn detail(&self) -> String;
}

fn parse_sort<F: SortField>(raw: &str) -> Result<F, CliError> {
    F::from_str(raw.trim()).map_err(|_| CliError::Validation {
        field: "sort".into(),
        reason: format!(
            "'{raw}' is not sortable; expected one of: {}",
            F::iter().map(SortField::key).collect::<Vec<_>>().join(", ")
        ),
    })
}

fn query_from_args<R: Resource>(
    args: ListArgs,
    session: &Session,
) -> Result<QueryState<R::SortField>, CliError> {
    let mut query = QueryState::<R::SortField>::default();
    query.page = args.page;
    query.page_size = args.per_page.unwrap_or(session.page_size);
    if let Some(raw) = args.sort.as_deref() {
        query.sort_field = parse_sort(raw)?;
    }
    if let Some(direction) = args.direction {
        query.direction = direction.into();
    }
    query.filter = args.search.unwrap_or_default();
    Ok(query)
}

pub async fn list<R: Presenter>(
    session: &Session,
    args: ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let query = query_from_args::<R>(args, session)?;
    let mut list = ListController::<R>::with_query(Arc::clone(&session.state), query);

    let request = list.reload();
    list.execute(&session.client, request).await?;

    let rows = list.snapshot();
    let out = output::render_list(session.output, &rows.items, R::row, |r| r.id().to_string())?;
    output::print_output(&out, global.quiet);
    if session.output == OutputFormat::Table && !global.quiet {
        output::print_summary(&list.page_info().summary(), session.color);
    }
    Ok(())
}

pub async fn get<R: Presenter>(
    session: &Session,
    id: EntityId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let entity = R::fetch_one(&session.client, id).await?;
    let out = output::render_single(session.output, &entity, R::detail, |r| r.id().to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn apply_fields<R: Resource>(
    form: &mut FormController<R>,
    fields: &[(String, String)],
) -> Result<(), CliError> {
    for (name, value) in fields {
        form.set_field(name, value).map_err(|_| CliError::Validation {
            field: name.clone(),
            reason: format!(
                "not a {} field; expected one of: {}",
                R::noun(),
                <R::Draft as Draft>::FIELDS.join(", ")
            ),
        })?;
    }
    Ok(())
}

async fn submit<R: Presenter>(
    session: &Session,
    mut form: FormController<R>,
    fields: &FieldArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    apply_fields(&mut form, &fields.fields)?;

    let mut rendered = None;
    form.submit(&session.client, |entity| {
        rendered = Some(output::render_single(
            session.output,
            entity,
            R::detail,
            |r| r.id().to_string(),
        ));
    })
    .await?;

    if let Some(message) = form.take_success_message() {
        output::print_success(&message, session.color, global.quiet);
    }
    if let Some(out) = rendered.transpose()? {
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

pub async fn add<R: Presenter>(
    session: &Session,
    fields: &FieldArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let form = FormController::<R>::new(Arc::clone(&session.state));
    submit(session, form, fields, global).await
}

/// Fetch the current record, overlay the given fields, PUT the result.
pub async fn edit<R: Presenter>(
    session: &Session,
    id: EntityId,
    fields: &FieldArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let form = FormController::<R>::load(Arc::clone(&session.state), &session.client, id).await?;
    submit(session, form, fields, global).await
}

pub async fn delete<R: Presenter>(
    session: &Session,
    id: EntityId,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut list = ListController::<R>::new(Arc::clone(&session.state));
    list.request_delete(id);

    let prompt = list.prompt();
    let action = format!("delete {} {id}", R::noun());
    let choice = if util::confirm(&action, &prompt.message, global.yes)? {
        PromptChoice::Confirm
    } else {
        PromptChoice::Cancel
    };

    if prompt.resolve(choice, || true, || false) != Some(true) {
        list.cancel_delete();
        if !global.quiet {
            eprintln!("Cancelled");
        }
        return Ok(());
    }

    list.execute_delete(&session.client).await?;
    output::print_success(
        &format!("{} {id} deleted", R::SINGULAR),
        session.color,
        global.quiet,
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use orangebox_core::{ProductSortField, ProviderSortField};

    #[test]
    fn sort_keys_parse_per_resource() {
        assert_eq!(
            parse_sort::<ProductSortField>("provider_name").unwrap(),
            ProductSortField::ProviderName
        );
        assert_eq!(
            parse_sort::<ProviderSortField>(" phone ").unwrap(),
            ProviderSortField::Phone
        );
    }

    #[test]
    fn unknown_sort_lists_valid_keys() {
        let err = parse_sort::<ProviderSortField>("price").unwrap_err();
        let CliError::Validation { reason, .. } = err else {
            panic!("expected validation error");
        };
        assert!(reason.contains("id, name, address, phone, description"));
    }
}
