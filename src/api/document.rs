//! Paginated document model for a recorded quotation.
//!
//! Arranges a [`Quotation`] into titled sections of label/value rows and
//! splits them across pages of a fixed height. Rendering to PDF or any
//! other format is left to the consumer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::models::Quotation;

/// Rows that fit on one page, section titles included.
pub const ROWS_PER_PAGE: usize = 18;

/// One label/value line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRow {
    /// Left-hand label.
    pub label: String,
    /// Formatted value.
    pub value: String,
}

/// A titled group of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    /// Section heading.
    pub title: String,
    /// Rows in display order.
    pub rows: Vec<DocumentRow>,
}

/// One page of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPage {
    /// One-based page number.
    pub number: usize,
    /// Sections, or parts of sections, on this page.
    pub sections: Vec<DocumentSection>,
}

/// A quotation laid out for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotationDocument {
    /// The quotation's folio.
    pub folio: String,
    /// Document heading.
    pub title: String,
    /// Number of pages.
    pub total_pages: usize,
    /// The pages, in order.
    pub pages: Vec<DocumentPage>,
}

impl QuotationDocument {
    /// Lays out a quotation with [`ROWS_PER_PAGE`] rows per page.
    ///
    /// Catalog ids are resolved to names through `loader`.
    pub fn build(quotation: &Quotation, loader: &ConfigLoader) -> Self {
        Self::build_with_page_size(quotation, loader, ROWS_PER_PAGE)
    }

    /// Lays out a quotation with a custom page height.
    ///
    /// A section that does not fit is continued on the next page under the
    /// same title with a "(cont.)" suffix. A page always holds at least one
    /// data row.
    pub fn build_with_page_size(
        quotation: &Quotation,
        loader: &ConfigLoader,
        rows_per_page: usize,
    ) -> Self {
        let rows_per_page = rows_per_page.max(2);
        let pages = paginate(sections(quotation, loader), rows_per_page);

        QuotationDocument {
            folio: quotation.folio.clone(),
            title: format!("Guard Staffing Quotation {}", quotation.folio),
            total_pages: pages.len(),
            pages,
        }
    }
}

fn sections(quotation: &Quotation, loader: &ConfigLoader) -> Vec<DocumentSection> {
    let draft = &quotation.draft;
    let request = &draft.request;
    let breakdown = &draft.breakdown;

    let business_line = loader
        .business_line(request.business_line_id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| format!("#{}", request.business_line_id));
    let shift_type = loader
        .shift_type(request.shift_type_id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| format!("#{}", request.shift_type_id));
    let region = loader
        .region(&request.federal_entity_id)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| request.federal_entity_id.clone());

    let mut uniform_rows: Vec<DocumentRow> = draft
        .uniforms_details
        .iter()
        .map(|d| {
            row(
                format!("{} {} {} × {}", d.uniform_type, d.size, d.color, d.quantity),
                format!("{} ({} / month)", money(d.subtotal), money(d.monthly_amortized)),
            )
        })
        .collect();
    uniform_rows.push(row("Uniform cost per guard", money(draft.uniform_cost)));

    vec![
        DocumentSection {
            title: "Quotation".to_string(),
            rows: vec![
                row("Folio", quotation.folio.clone()),
                row("Date", quotation.created_at.format("%Y-%m-%d").to_string()),
                row("Business line", business_line),
                row("Shift type", shift_type),
                row("Federal entity", region),
                row("Guards", request.total_elements.to_string()),
            ],
        },
        DocumentSection {
            title: "Monthly salary".to_string(),
            rows: vec![
                row("Net salary", money(request.net_salary)),
                row(
                    format!("Rest days ({})", request.total_rest_days),
                    money(breakdown.rest_days_pay),
                ),
                row("Holidays", money(breakdown.holiday_pay)),
                row("Day 31", money(breakdown.day_31_pay)),
                row("Monthly salary", money(draft.monthly_salary)),
            ],
        },
        DocumentSection {
            title: "Statutory benefits".to_string(),
            rows: vec![
                row("Vacations", money(breakdown.vacations)),
                row("Vacation premium", money(breakdown.vacation_premium)),
                row("Year-end bonus", money(breakdown.christmas_bonus)),
                row("Seniority premium", money(breakdown.seniority_pay)),
                row("Total benefits", money(draft.total_benefits)),
            ],
        },
        DocumentSection {
            title: "Cost per guard".to_string(),
            rows: vec![
                row("Social security", money(draft.total_social_charge)),
                row("State tax", money(draft.state_tax)),
                row("Administrative expenses", money(breakdown.admin_expenses)),
                row("Total cost per guard", money(draft.total_cost_per_guard)),
            ],
        },
        DocumentSection {
            title: "Uniforms".to_string(),
            rows: uniform_rows,
        },
        DocumentSection {
            title: "Sale price".to_string(),
            rows: vec![
                row(
                    "Sale cost without financing",
                    money(draft.sale_cost_without_financing),
                ),
                row("Financing", money(draft.financing)),
                row("Total sale cost", money(draft.total_sale_cost)),
                row("Utility", money(draft.utility)),
                row("Sale price per guard", money(draft.sale_price)),
                row(
                    format!("Total monthly price ({} guards)", request.total_elements),
                    money(draft.total_monthly_price),
                ),
            ],
        },
    ]
}

/// Splits sections across pages; each section title takes one row.
fn paginate(sections: Vec<DocumentSection>, rows_per_page: usize) -> Vec<DocumentPage> {
    let mut pages = Vec::new();
    let mut current: Vec<DocumentSection> = Vec::new();
    let mut used = 0;

    for section in sections {
        let mut rows = section.rows.into_iter().peekable();
        let mut title = section.title.clone();

        while rows.peek().is_some() {
            // Title plus at least one row must fit.
            if used + 2 > rows_per_page {
                pages.push(DocumentPage {
                    number: pages.len() + 1,
                    sections: std::mem::take(&mut current),
                });
                used = 0;
            }

            let capacity = rows_per_page - used - 1;
            let chunk: Vec<DocumentRow> = rows.by_ref().take(capacity).collect();
            used += chunk.len() + 1;
            current.push(DocumentSection {
                title: title.clone(),
                rows: chunk,
            });
            title = format!("{} (cont.)", section.title);
        }
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(DocumentPage {
            number: pages.len() + 1,
            sections: current,
        });
    }

    pages
}

fn row(label: impl Into<String>, value: impl Into<String>) -> DocumentRow {
    DocumentRow {
        label: label.into(),
        value: value.into(),
    }
}

fn money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}
