//! Pending raster work and the finalization step that resolves it.
//!
//! During the walk, gradients and icons are recorded as pending images in paint order. Once the
//! walk is complete every request of the export is issued at once and joined; each result is
//! then put back at the position its request held.

use futures::future::join_all;
use log::debug;

use super::diagnostics::{Diagnostic, Diagnostics};
use crate::models::{
    common::Frame,
    primitives::{DrawPrimitive, ImagePrimitive},
    slide::{Slide, SlideBackground},
};
use crate::raster::{RasterRequest, Rasterizer};

/// An image whose bytes still have to come from the rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingImage {
    pub node: String,
    pub frame: Frame,
    pub request: RasterRequest,
}

/// One entry of a slide's paint list before finalization.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Emission {
    Ready(DrawPrimitive),
    Pending(PendingImage),
}

#[cfg(test)]
impl Emission {
    pub fn ready(&self) -> Option<&DrawPrimitive> {
        match self {
            Emission::Ready(primitive) => Some(primitive),
            Emission::Pending(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlannedBackground {
    Ready(SlideBackground),
    Pending { node: String, request: RasterRequest },
}

/// A slide as built by the walker.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct PlannedSlide {
    pub background: Option<PlannedBackground>,
    pub notes: Option<String>,
    pub items: Vec<Emission>,
}

impl PlannedSlide {
    fn requests(&self) -> impl Iterator<Item = &RasterRequest> {
        let background = match &self.background {
            Some(PlannedBackground::Pending { request, .. }) => Some(request),
            _ => None,
        };
        background.into_iter().chain(self.items.iter().filter_map(|item| match item {
            Emission::Pending(pending) => Some(&pending.request),
            Emission::Ready(_) => None,
        }))
    }
}

/// Resolves every pending raster request concurrently and produces the final slides.
///
/// A request that yields no bytes drops only its own image and is reported as a
/// `RasterizationFailure`; everything else on the slide is kept in order.
pub(crate) async fn finalize_slides<R: Rasterizer>(
    plan: Vec<PlannedSlide>,
    rasterizer: &R,
    diagnostics: &mut Diagnostics,
) -> Vec<Slide> {
    let results: Vec<Option<Vec<u8>>> = {
        let requests: Vec<&RasterRequest> = plan.iter().flat_map(PlannedSlide::requests).collect();
        debug!("[finalize_slides] issuing {} raster requests", requests.len());
        join_all(requests.into_iter().map(|request| rasterizer.rasterize(request))).await
    };
    // Results come back in request order, which is background first, then items, per slide.
    let mut results = results
        .into_iter()
        .map(|bytes| bytes.filter(|data| !data.is_empty()));

    let mut slides = Vec::with_capacity(plan.len());
    for planned in plan {
        let background = match planned.background {
            Some(PlannedBackground::Ready(background)) => Some(background),
            Some(PlannedBackground::Pending { node, .. }) => match results.next().flatten() {
                Some(data) => Some(SlideBackground::Image { data }),
                None => {
                    diagnostics.report(Diagnostic::RasterizationFailure { node });
                    None
                }
            },
            None => None,
        };

        let mut primitives = Vec::with_capacity(planned.items.len());
        for item in planned.items {
            match item {
                Emission::Ready(primitive) => primitives.push(primitive),
                Emission::Pending(pending) => match results.next().flatten() {
                    Some(data) => primitives.push(DrawPrimitive::Image(ImagePrimitive {
                        frame: pending.frame,
                        data,
                    })),
                    None => diagnostics.report(Diagnostic::RasterizationFailure {
                        node: pending.node,
                    }),
                },
            }
        }

        slides.push(Slide {
            background,
            notes: planned.notes,
            primitives,
        });
    }
    slides
}
