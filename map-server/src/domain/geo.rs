//! Geographic primitives: coordinates, bounding boxes, viewports.

/// Fraction of each bbox dimension added as padding when fitting.
pub const BBOX_PADDING_FRACTION: f64 = 0.1;

/// Zoom level used when centering on a point without a bounding box.
pub const POINT_ZOOM: u8 = 14;

/// A coordinate pair, finite by construction.
///
/// ```
/// use map_server::domain::LatLng;
///
/// assert!(LatLng::new(59.91, 10.75).is_some());
/// assert!(LatLng::new(f64::NAN, 10.75).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Build a pair; `None` unless both components are finite.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(LatLng { lat, lng })
        } else {
            None
        }
    }
}

/// A rectangular geographic region, south/north/west/east bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl BoundingBox {
    /// The box grown by `fraction` of its own extent on every side.
    pub fn expanded(&self, fraction: f64) -> BoundingBox {
        let lat_pad = (self.north - self.south) * fraction;
        let lng_pad = (self.east - self.west) * fraction;
        BoundingBox {
            south: self.south - lat_pad,
            north: self.north + lat_pad,
            west: self.west - lng_pad,
            east: self.east + lng_pad,
        }
    }
}

/// One geocoding hit, rebuilt from scratch on every query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Human-readable place label.
    pub display: String,
    pub lat: f64,
    pub lon: f64,
    /// Present only when the upstream sent a usable 4-value box.
    pub bbox: Option<BoundingBox>,
}

/// Where the map should move after a search result is selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// Fit these bounds (padding already applied).
    Fit(BoundingBox),
    /// Center on a point at a fixed zoom.
    Center { lat: f64, lon: f64, zoom: u8 },
}

impl Viewport {
    /// Viewport for a selected result: fit the padded bounding box when
    /// one exists, otherwise center on the point at [`POINT_ZOOM`].
    pub fn for_result(result: &SearchResult) -> Viewport {
        match result.bbox {
            Some(bbox) => Viewport::Fit(bbox.expanded(BBOX_PADDING_FRACTION)),
            None => Viewport::Center {
                lat: result.lat,
                lon: result.lon,
                zoom: POINT_ZOOM,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn latlng_requires_finite_components() {
        assert_eq!(
            LatLng::new(60.1, 10.2),
            Some(LatLng { lat: 60.1, lng: 10.2 })
        );
        assert_eq!(LatLng::new(f64::INFINITY, 10.2), None);
        assert_eq!(LatLng::new(60.1, f64::NAN), None);
        assert_eq!(LatLng::new(f64::NAN, f64::NAN), None);
    }

    #[test]
    fn expanded_pads_each_axis_by_fraction_of_extent() {
        let bbox = BoundingBox {
            south: 59.0,
            north: 60.0,
            west: 10.0,
            east: 11.0,
        };
        let padded = bbox.expanded(0.1);
        assert!(close(padded.south, 58.9));
        assert!(close(padded.north, 60.1));
        assert!(close(padded.west, 9.9));
        assert!(close(padded.east, 11.1));
    }

    #[test]
    fn viewport_fits_padded_bbox_when_present() {
        let result = SearchResult {
            display: "Oslo, Norway".into(),
            lat: 59.91,
            lon: 10.75,
            bbox: Some(BoundingBox {
                south: 59.8,
                north: 60.0,
                west: 10.6,
                east: 10.9,
            }),
        };

        match Viewport::for_result(&result) {
            Viewport::Fit(bounds) => {
                let expected = result.bbox.unwrap().expanded(BBOX_PADDING_FRACTION);
                assert!(close(bounds.south, expected.south));
                assert!(close(bounds.north, expected.north));
                assert!(close(bounds.west, expected.west));
                assert!(close(bounds.east, expected.east));
            }
            other => panic!("expected Fit, got {other:?}"),
        }
    }

    #[test]
    fn viewport_centers_at_fixed_zoom_without_bbox() {
        let result = SearchResult {
            display: "Somewhere".into(),
            lat: 59.91,
            lon: 10.75,
            bbox: None,
        };

        assert_eq!(
            Viewport::for_result(&result),
            Viewport::Center {
                lat: 59.91,
                lon: 10.75,
                zoom: POINT_ZOOM
            }
        );
    }
}
