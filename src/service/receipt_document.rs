use chrono::NaiveDate;
use printpdf::{
    path::{PaintMode, WindingOrder},
    BuiltinFont, Color, Image, ImageTransform, Mm, PdfDocument, Point, Polygon, Rgb,
};
use thiserror::Error;

use crate::{
    models::{clientmodel::Client, propertymodel::Property},
    utils::currency::format_usd,
};

// A4 portrait.
const PAGE_WIDTH_PT: f32 = 595.28;
const PAGE_HEIGHT_PT: f32 = 841.89;

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("Receipt amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    #[error("Company name is required")]
    MissingCompanyName,

    #[error("Pdf rendering failed: {0}")]
    Render(String),
}

/// Issuance inputs that are not part of the client or property records.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptDetails<'a> {
    pub receipt_number: &'a str,
    pub amount: f64,
    pub issued_at: NaiveDate,
    pub company_name: &'a str,
    pub company_address: Option<&'a str>,
}

/// The full text of a receipt document, composed before any drawing happens.
///
/// Keeping composition separate from rendering lets tests assert the exact
/// wording without parsing PDF bytes, and guarantees a logo problem can never
/// change what the document says.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptContent {
    pub company_name: String,
    pub company_address: Option<String>,
    pub heading: String,
    pub issued_line: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub property_name: String,
    pub property_location: Option<String>,
    pub category_line: String,
    pub amount_line: String,
    pub property_line: String,
    pub date_line: String,
    pub footer: String,
    pub file_name: String,
}

impl ReceiptContent {
    pub fn compose(
        details: &ReceiptDetails<'_>,
        client: &Client,
        property: &Property,
    ) -> Result<Self, ReceiptError> {
        if details.amount <= 0.0 {
            return Err(ReceiptError::NonPositiveAmount(details.amount));
        }
        if details.company_name.trim().is_empty() {
            return Err(ReceiptError::MissingCompanyName);
        }

        Ok(Self {
            company_name: details.company_name.to_string(),
            company_address: details.company_address.map(|address| address.to_string()),
            heading: format!("Receipt #{}", details.receipt_number),
            issued_line: format!("Issued on: {}", details.issued_at),
            client_name: client.name.clone(),
            client_email: client.email.clone(),
            client_phone: client.phone.clone(),
            property_name: property.name.clone(),
            property_location: property.location.clone(),
            category_line: format!("Category: {}", property.category.to_str()),
            amount_line: format!("Amount Paid: {}", format_usd(details.amount)),
            property_line: format!("Property: {}", property.name),
            date_line: format!("Receipt Date: {}", details.issued_at),
            footer: "Thank you for choosing our services!".to_string(),
            file_name: format!("receipt-{}.pdf", details.receipt_number),
        })
    }

    /// Every drawn line, in draw order, headers included.
    pub fn text_sections(&self) -> Vec<&str> {
        let mut sections = vec![self.company_name.as_str()];
        if let Some(address) = &self.company_address {
            sections.push(address);
        }
        sections.extend([
            self.heading.as_str(),
            self.issued_line.as_str(),
            "Bill To",
            self.client_name.as_str(),
            self.client_email.as_str(),
            self.client_phone.as_str(),
            "Property Details",
            self.property_name.as_str(),
        ]);
        if let Some(location) = &self.property_location {
            sections.push(location);
        }
        sections.extend([
            self.category_line.as_str(),
            "Payment Summary",
            self.amount_line.as_str(),
            self.property_line.as_str(),
            self.date_line.as_str(),
            self.footer.as_str(),
        ]);
        sections
    }
}

/// Draws the fixed A4 layout: company block top-left, receipt number and issue
/// date top-right, Bill To in the left column, Property Details in the right
/// column, tinted payment summary band below both, courtesy footer at the
/// bottom. An undecodable logo is skipped, never fatal.
pub fn render(content: &ReceiptContent, logo: Option<&[u8]>) -> Result<Vec<u8>, ReceiptError> {
    let (doc, page_index, layer_index) =
        PdfDocument::new("Receipt", pt(PAGE_WIDTH_PT), pt(PAGE_HEIGHT_PT), "Layer 1");
    let layer = doc.get_page(page_index).get_layer(layer_index);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReceiptError::Render(e.to_string()))?;

    if let Some(bytes) = logo {
        match printpdf::image_crate::load_from_memory(bytes) {
            Ok(decoded) => {
                Image::from_dynamic_image(&decoded).add_to_layer(
                    layer.clone(),
                    ImageTransform {
                        translate_x: Some(pt(40.0)),
                        translate_y: Some(pt(PAGE_HEIGHT_PT - 100.0)),
                        scale_x: Some(0.25),
                        scale_y: Some(0.25),
                        ..Default::default()
                    },
                );
            }
            Err(err) => {
                tracing::warn!("Skipping receipt logo, image decoding failed: {}", err);
            }
        }
    }

    let section_y = PAGE_HEIGHT_PT - 140.0;
    let band_y = section_y - 200.0;

    // Background fill first, text on top.
    layer.set_fill_color(band_color());
    layer.add_polygon(Polygon {
        rings: vec![vec![
            (Point::new(pt(40.0), pt(band_y)), false),
            (Point::new(pt(PAGE_WIDTH_PT - 40.0), pt(band_y)), false),
            (
                Point::new(pt(PAGE_WIDTH_PT - 40.0), pt(band_y + 120.0)),
                false,
            ),
            (Point::new(pt(40.0), pt(band_y + 120.0)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });

    layer.set_fill_color(text_color());
    layer.use_text(
        &content.company_name,
        18.0,
        pt(40.0),
        pt(PAGE_HEIGHT_PT - 60.0),
        &font,
    );
    if let Some(address) = &content.company_address {
        layer.use_text(address, 11.0, pt(40.0), pt(PAGE_HEIGHT_PT - 80.0), &font);
    }

    layer.set_fill_color(accent_color());
    layer.use_text(
        &content.heading,
        16.0,
        pt(PAGE_WIDTH_PT - 200.0),
        pt(PAGE_HEIGHT_PT - 60.0),
        &font,
    );
    layer.set_fill_color(text_color());
    layer.use_text(
        &content.issued_line,
        11.0,
        pt(PAGE_WIDTH_PT - 200.0),
        pt(PAGE_HEIGHT_PT - 80.0),
        &font,
    );

    layer.set_fill_color(accent_color());
    layer.use_text("Bill To", 13.0, pt(40.0), pt(section_y), &font);
    layer.set_fill_color(text_color());
    layer.use_text(&content.client_name, 12.0, pt(40.0), pt(section_y - 20.0), &font);
    layer.use_text(&content.client_email, 12.0, pt(40.0), pt(section_y - 36.0), &font);
    layer.use_text(&content.client_phone, 12.0, pt(40.0), pt(section_y - 52.0), &font);

    layer.set_fill_color(accent_color());
    layer.use_text("Property Details", 13.0, pt(300.0), pt(section_y), &font);
    layer.set_fill_color(text_color());
    layer.use_text(
        &content.property_name,
        12.0,
        pt(300.0),
        pt(section_y - 20.0),
        &font,
    );
    if let Some(location) = &content.property_location {
        layer.use_text(location, 12.0, pt(300.0), pt(section_y - 36.0), &font);
    }
    layer.use_text(
        &content.category_line,
        12.0,
        pt(300.0),
        pt(section_y - 52.0),
        &font,
    );

    layer.set_fill_color(accent_color());
    layer.use_text("Payment Summary", 14.0, pt(60.0), pt(band_y + 90.0), &font);
    layer.set_fill_color(text_color());
    layer.use_text(&content.amount_line, 12.0, pt(60.0), pt(band_y + 60.0), &font);
    layer.use_text(&content.property_line, 12.0, pt(60.0), pt(band_y + 40.0), &font);
    layer.use_text(&content.date_line, 12.0, pt(60.0), pt(band_y + 20.0), &font);

    layer.set_fill_color(accent_color());
    layer.use_text(&content.footer, 12.0, pt(40.0), pt(100.0), &font);

    doc.save_to_bytes()
        .map_err(|e| ReceiptError::Render(e.to_string()))
}

fn pt(value: f32) -> Mm {
    Mm(value * 25.4 / 72.0)
}

fn text_color() -> Color {
    Color::Rgb(Rgb::new(0.1, 0.1, 0.1, None))
}

fn accent_color() -> Color {
    Color::Rgb(Rgb::new(0.1, 0.2, 0.6, None))
}

fn band_color() -> Color {
    Color::Rgb(Rgb::new(0.95, 0.97, 1.0, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::propertymodel::PropertyCategory;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_client() -> Client {
        Client {
            id: Uuid::new_v4(),
            name: "A. Smith".to_string(),
            email: "a.smith@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            documents: None,
            purchase_history: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_property() -> Property {
        Property {
            id: Uuid::new_v4(),
            name: "Plot 7".to_string(),
            category: PropertyCategory::Plot,
            location: Some("Greenfield Estate".to_string()),
            price: 50000.0,
            description: None,
            short_description: None,
            images: None,
            virtual_tour_url: None,
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_details() -> ReceiptDetails<'static> {
        ReceiptDetails {
            receipt_number: "AB12CD34",
            amount: 50000.0,
            issued_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            company_name: "Acme Estates",
            company_address: Some("12 Harbour Road"),
        }
    }

    #[test]
    fn compose_produces_expected_wording() {
        let content =
            ReceiptContent::compose(&sample_details(), &sample_client(), &sample_property())
                .unwrap();

        assert_eq!(content.heading, "Receipt #AB12CD34");
        assert_eq!(content.issued_line, "Issued on: 2024-01-15");
        assert_eq!(content.amount_line, "Amount Paid: $50,000");
        assert_eq!(content.property_line, "Property: Plot 7");
        assert_eq!(content.date_line, "Receipt Date: 2024-01-15");
        assert_eq!(content.category_line, "Category: plot");
        assert_eq!(content.footer, "Thank you for choosing our services!");
        assert_eq!(content.file_name, "receipt-AB12CD34.pdf");
    }

    #[test]
    fn compose_lists_sections_in_draw_order() {
        let content =
            ReceiptContent::compose(&sample_details(), &sample_client(), &sample_property())
                .unwrap();
        let sections = content.text_sections();

        assert_eq!(sections[0], "Acme Estates");
        assert_eq!(sections[1], "12 Harbour Road");
        assert!(sections.contains(&"Bill To"));
        assert!(sections.contains(&"A. Smith"));
        assert!(sections.contains(&"Property Details"));
        assert!(sections.contains(&"Greenfield Estate"));
        assert!(sections.contains(&"Payment Summary"));
        assert_eq!(sections.last(), Some(&"Thank you for choosing our services!"));
    }

    #[test]
    fn compose_skips_optional_address_and_location() {
        let mut details = sample_details();
        details.company_address = None;
        let mut property = sample_property();
        property.location = None;

        let content = ReceiptContent::compose(&details, &sample_client(), &property).unwrap();
        let sections = content.text_sections();

        assert!(!sections.contains(&"12 Harbour Road"));
        assert!(!sections.contains(&"Greenfield Estate"));
        assert_eq!(sections[0], "Acme Estates");
        assert_eq!(sections[1], "Receipt #AB12CD34");
    }

    #[test]
    fn compose_rejects_non_positive_amount() {
        let mut details = sample_details();
        details.amount = 0.0;
        assert!(matches!(
            ReceiptContent::compose(&details, &sample_client(), &sample_property()),
            Err(ReceiptError::NonPositiveAmount(_))
        ));

        details.amount = -5.0;
        assert!(matches!(
            ReceiptContent::compose(&details, &sample_client(), &sample_property()),
            Err(ReceiptError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn compose_rejects_blank_company_name() {
        let mut details = sample_details();
        details.company_name = "  ";
        assert!(matches!(
            ReceiptContent::compose(&details, &sample_client(), &sample_property()),
            Err(ReceiptError::MissingCompanyName)
        ));
    }

    #[test]
    fn render_emits_pdf_bytes() {
        let content =
            ReceiptContent::compose(&sample_details(), &sample_client(), &sample_property())
                .unwrap();
        let bytes = render(&content, None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn render_survives_undecodable_logo() {
        let content =
            ReceiptContent::compose(&sample_details(), &sample_client(), &sample_property())
                .unwrap();
        let bytes = render(&content, Some(b"definitely not an image")).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
