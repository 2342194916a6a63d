use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    encode::RenderRequest,
    endpoint::{Endpoint, Endpoints},
    month::CalendarMonth,
    plan::{ConfigError, PlanConfig},
};

/// One month image in the gallery; `index` is its position in the whole plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GalleryItem {
    pub index: usize,
    pub month: CalendarMonth,
    pub src:   String,
}

/// Every link needed to show and export a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    start:      NaiveDate,
    items:      Vec<GalleryItem>,
    thumbnails: Vec<GalleryItem>,
    by_year:    BTreeMap<u16, Vec<GalleryItem>>,
    pdf_url:    String,
    ics_url:    String,
}

impl Preview {
    /// Resolves the start date, walks the plan's months and builds a URL for
    /// each, in chronological order.
    ///
    /// The PDF and ICS links are addressed by the start month.
    ///
    /// # Errors
    /// Returns `ConfigError` when the start date cannot be resolved or lies
    /// outside the supported years.
    #[instrument(level = "debug", skip_all, fields(coverage = %config.coverage().kind()))]
    pub fn build(
        config: &PlanConfig,
        today: NaiveDate,
        endpoints: &Endpoints,
    ) -> Result<Self, ConfigError> {
        let start = config.start_date(today)?;
        let months = config.months_to_render(start)?;
        debug!(%start, months = months.len(), "building preview");

        let mut items = Vec::with_capacity(months.len());
        let mut thumbnails = Vec::with_capacity(months.len());
        let mut by_year: BTreeMap<u16, Vec<GalleryItem>> = BTreeMap::new();
        for (index, month) in months.enumerate() {
            let request = RenderRequest::new(config, month, start);
            let item = GalleryItem {
                index,
                month,
                src: endpoints.url(Endpoint::Png, &request),
            };
            by_year
                .entry(month.year().get())
                .or_default()
                .push(item.clone());
            thumbnails.push(GalleryItem {
                index,
                month,
                src: endpoints.url(Endpoint::Svg, &request),
            });
            items.push(item);
        }

        let export = RenderRequest::new(config, CalendarMonth::containing(start)?, start);
        Ok(Self {
            start,
            items,
            thumbnails,
            by_year,
            pdf_url: endpoints.url(Endpoint::Pdf, &export),
            ics_url: endpoints.url(Endpoint::Ics, &export),
        })
    }

    /// Resolved first day of the plan
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Full-size images, one per month
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Vector thumbnails, parallel to [`items`](Self::items)
    pub fn thumbnails(&self) -> &[GalleryItem] {
        &self.thumbnails
    }

    /// Full-size images grouped by calendar year
    pub const fn by_year(&self) -> &BTreeMap<u16, Vec<GalleryItem>> {
        &self.by_year
    }

    pub fn pdf_url(&self) -> &str {
        &self.pdf_url
    }

    pub fn ics_url(&self) -> &str {
        &self.ics_url
    }

    /// URLs for `endpoint`: one per month for images, a single link for exports
    pub fn links(&self, endpoint: Endpoint) -> Vec<&str> {
        match endpoint {
            Endpoint::Png => self.items.iter().map(|item| item.src.as_str()).collect(),
            Endpoint::Svg => self.thumbnails.iter().map(|item| item.src.as_str()).collect(),
            Endpoint::Pdf => vec![self.pdf_url.as_str()],
            Endpoint::Ics => vec![self.ics_url.as_str()],
        }
    }
}
