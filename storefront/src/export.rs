//! Ticket export: composing rendered tickets into a paginated document.
//!
//! The core drives one page-append per finalized ticket, in ticket order,
//! as an ordered await chain (never parallelized, so page order always
//! matches ticket order). Rendering a ticket's visual representation is the
//! job of the [`TicketRenderer`] collaborator; a failed render is skipped
//! with a warning rather than aborting the export. There is no cancellation
//! path and no timeout.
//!
//! Page-break arithmetic (A4 portrait, millimetres): each image is placed
//! at x = 10 in a 190 x 60 box and the cursor advances 70 per row; before
//! placing, if a full row plus the fixed top offset no longer fits the
//! remaining page height (cursor + 80 past the 297 page height), a new
//! page starts with the cursor back at the top offset.

use crate::types::{FinalizedTicket, TicketId};
use async_trait::async_trait;

/// Page height in millimetres (A4 portrait)
pub const PAGE_HEIGHT_MM: f64 = 297.0;
/// Fixed top offset where each page's content starts
pub const TOP_OFFSET_MM: f64 = 10.0;
/// Left edge of every placed image
pub const IMAGE_X_MM: f64 = 10.0;
/// Placed image width
pub const IMAGE_WIDTH_MM: f64 = 190.0;
/// Placed image height
pub const IMAGE_HEIGHT_MM: f64 = 60.0;
/// Cursor advance after each placed image
pub const ROW_ADVANCE_MM: f64 = 70.0;

/// A rendered ticket bitmap
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketImage {
    /// Bitmap width in pixels
    pub width_px: u32,
    /// Bitmap height in pixels
    pub height_px: u32,
    /// Encoded image bytes (PNG)
    pub data: Vec<u8>,
}

/// Renders one finalized ticket's visual representation
///
/// The collaborator locates whatever stands in for the ticket's rendered
/// view (in the original UI, a DOM element keyed by ticket id) and
/// rasterizes it. `None` means the representation could not be found; the
/// composer skips that ticket.
#[async_trait]
pub trait TicketRenderer: Send + Sync {
    /// Render the ticket, or `None` if its visual representation is missing
    async fn render(&self, ticket: &FinalizedTicket) -> Option<TicketImage>;
}

/// One image placed on a page
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    /// Ticket the image belongs to
    pub ticket_id: TicketId,
    /// Left edge in millimetres
    pub x_mm: f64,
    /// Top edge in millimetres
    pub y_mm: f64,
    /// Placed width in millimetres
    pub width_mm: f64,
    /// Placed height in millimetres
    pub height_mm: f64,
    /// The rendered bitmap
    pub image: TicketImage,
}

/// One page of placed ticket images
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketPage {
    /// Placements in top-to-bottom order
    pub placements: Vec<Placement>,
}

/// The composed, paginated ticket document
///
/// Plain data for a downstream PDF/print writer; this module does no
/// encoding of its own.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TicketDocument {
    /// Pages in order; always at least one page, possibly empty
    pub pages: Vec<TicketPage>,
}

impl TicketDocument {
    /// Total number of placed images across all pages
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.pages.iter().map(|p| p.placements.len()).sum()
    }
}

/// Compose the export document for an ordered ticket list
///
/// Awaits one render per ticket sequentially so that placement order (and
/// page order) matches ticket order exactly. Tickets whose render fails
/// are skipped and logged.
pub async fn compose_document(
    tickets: &[FinalizedTicket],
    renderer: &dyn TicketRenderer,
) -> TicketDocument {
    let mut pages = vec![TicketPage::default()];
    let mut cursor_mm = TOP_OFFSET_MM;

    for ticket in tickets {
        let Some(image) = renderer.render(ticket).await else {
            tracing::warn!(ticket_id = %ticket.ticket_id, "ticket render missing, skipping page entry");
            continue;
        };

        if cursor_mm + ROW_ADVANCE_MM + TOP_OFFSET_MM > PAGE_HEIGHT_MM {
            pages.push(TicketPage::default());
            cursor_mm = TOP_OFFSET_MM;
        }

        // `pages` is never empty: seeded with one page and only ever pushed to
        if let Some(page) = pages.last_mut() {
            page.placements.push(Placement {
                ticket_id: ticket.ticket_id.clone(),
                x_mm: IMAGE_X_MM,
                y_mm: cursor_mm,
                width_mm: IMAGE_WIDTH_MM,
                height_mm: IMAGE_HEIGHT_MM,
                image,
            });
        }
        cursor_mm += ROW_ADVANCE_MM;
    }

    TicketDocument { pages }
}
