// ── API-to-domain type conversions ──
//
// Bridges raw `orangebox_api` wire types into `orangebox_core::model`
// domain types and back into request payloads.

use chrono::{DateTime, NaiveDateTime, Utc};

use orangebox_api::{
    ListEnvelope, PaginationRecord, ProductPayload, ProductRecord, ProviderPayload,
    ProviderRecord,
};

use crate::model::{EntityId, Page, PageInfo, Product, ProductDraft, Provider, ProviderDraft};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a backend timestamp: RFC 3339 first, then the bare
/// `YYYY-MM-DD HH:MM:SS` SQL form (assumed UTC). Unparseable values drop.
fn parse_datetime(raw: Option<&String>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

// ── Entities ───────────────────────────────────────────────────────

impl From<ProductRecord> for Product {
    fn from(r: ProductRecord) -> Self {
        Self {
            id: EntityId::new(r.id),
            name: r.name,
            price: r.price,
            stock: r.stock,
            description: r.description.unwrap_or_default(),
            provider_name: r.provider_name,
            provider_id: r.provider_id.map(EntityId::new),
        }
    }
}

impl From<ProviderRecord> for Provider {
    fn from(r: ProviderRecord) -> Self {
        Self {
            id: EntityId::new(r.id),
            name: r.name,
            address: r.address.unwrap_or_default(),
            phone: r.phone.unwrap_or_default(),
            description: r.description.unwrap_or_default(),
            created_at: parse_datetime(r.created_at.as_ref()),
            updated_at: parse_datetime(r.updated_at.as_ref()),
        }
    }
}

// ── Payloads ───────────────────────────────────────────────────────

impl From<&ProductDraft> for ProductPayload {
    fn from(d: &ProductDraft) -> Self {
        Self {
            name: d.name.clone(),
            price: d.price,
            description: d.description.clone(),
            stock: d.stock,
            provider_id: d.provider_id,
        }
    }
}

impl From<&ProviderDraft> for ProviderPayload {
    fn from(d: &ProviderDraft) -> Self {
        Self {
            name: d.name.clone(),
            address: d.address.clone(),
            phone: d.phone.clone(),
            description: d.description.clone(),
        }
    }
}

// ── Pagination ─────────────────────────────────────────────────────

impl From<PaginationRecord> for PageInfo {
    fn from(p: PaginationRecord) -> Self {
        Self {
            page_size: p.per_page,
            range_start: p.from,
            range_end: p.to,
            total: p.total,
            has_next: p.links.next_page_url.is_some(),
            has_prev: p.links.prev_page_url.is_some(),
        }
    }
}

/// Convert a list envelope. Unpaginated responses (`per_page=-1`) carry
/// no pagination block; they are described as a single full page.
pub(crate) fn page_from_envelope<R, T>(env: ListEnvelope<R>) -> Page<T>
where
    T: From<R>,
{
    let items: Vec<T> = env.data.into_iter().map(T::from).collect();
    let info = env.pagination.map_or_else(
        || {
            let count = i64::try_from(items.len()).unwrap_or(i64::MAX);
            PageInfo {
                page_size: count,
                range_start: (count > 0).then_some(1),
                range_end: (count > 0).then_some(count),
                total: count,
                has_next: false,
                has_prev: false,
            }
        },
        PageInfo::from,
    );
    Page { items, info }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use orangebox_api::PaginationLinks;
    use pretty_assertions::assert_eq;

    fn provider_record(created_at: Option<&str>) -> ProviderRecord {
        ProviderRecord {
            id: 3,
            name: "Acme".into(),
            address: None,
            phone: Some("555".into()),
            description: None,
            created_at: created_at.map(str::to_owned),
            updated_at: None,
        }
    }

    #[test]
    fn provider_timestamps_accept_both_formats() {
        let rfc: Provider = provider_record(Some("2024-03-01T10:00:00.000000Z")).into();
        let sql: Provider = provider_record(Some("2024-03-01 10:00:00")).into();
        let junk: Provider = provider_record(Some("yesterday")).into();

        assert_eq!(rfc.created_at, sql.created_at);
        assert!(rfc.created_at.is_some());
        assert_eq!(junk.created_at, None);
        assert_eq!(rfc.address, "");
    }

    #[test]
    fn pagination_links_drive_next_and_prev() {
        let info = PageInfo::from(PaginationRecord {
            per_page: 5,
            from: Some(6),
            to: Some(10),
            total: 12,
            links: PaginationLinks {
                next_page_url: Some("http://x/api/products?page=3".into()),
                prev_page_url: None,
            },
        });
        assert!(info.has_next);
        assert!(!info.has_prev);
        assert_eq!(info.range_start, Some(6));
    }

    #[test]
    fn unpaginated_envelope_is_single_page() {
        let env = ListEnvelope {
            data: vec![provider_record(None), provider_record(None)],
            pagination: None,
        };
        let page: Page<Provider> = page_from_envelope(env);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.info.total, 2);
        assert_eq!(page.info.range_end, Some(2));
        assert!(!page.info.has_next);
    }
}
