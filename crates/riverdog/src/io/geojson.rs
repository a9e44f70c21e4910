use std::path::Path;

use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use crate::{
    catalog::perimeter,
    error::Result,
    pipeline::RiverDetection,
    types::Shape,
};

/// A single pixel is a Point and a boundary enclosing no area is an open
/// LineString, since neither can form a valid linear ring.
fn shape_geometry(shape: &Shape) -> Geometry {
    let polygon = shape.polygon();
    if polygon.is_single_point() {
        let seed = polygon.seed();
        return Geometry::new(Value::Point(vec![seed.x as f64, seed.y as f64]));
    }
    if polygon.area() == 0.0 {
        let positions = polygon
            .points()
            .iter()
            .map(|p| vec![p.x as f64, p.y as f64])
            .collect();
        return Geometry::new(Value::LineString(positions));
    }
    Geometry::new(Value::from(&polygon.to_geo_polygon()))
}

fn shape_properties(id: usize, shape: &Shape) -> JsonObject {
    let polygon = shape.polygon();
    let [cx, cy] = polygon.centroid();

    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), JsonValue::from(id));
    properties.insert("kind".to_string(), JsonValue::from(shape.kind().to_string()));
    properties.insert("color".to_string(), JsonValue::from(shape.color_hex()));
    properties.insert("perimeter".to_string(), JsonValue::from(perimeter(shape)));
    properties.insert("area".to_string(), JsonValue::from(polygon.area()));
    properties.insert("point_count".to_string(), JsonValue::from(polygon.len()));
    properties.insert("centroid".to_string(), JsonValue::from(vec![cx, cy]));
    properties
}

impl RiverDetection {
    /// One feature per segment, in segment order, with image metadata as
    /// foreign members of the collection.
    pub fn to_geojson(&self) -> Result<FeatureCollection> {
        let features = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, shape)| Feature {
                bbox: None,
                geometry: Some(shape_geometry(shape)),
                id: Some(Id::Number(i.into())),
                properties: Some(shape_properties(i, shape)),
                foreign_members: None,
            })
            .collect();

        let mut foreign_members = JsonObject::new();
        foreign_members.insert("image_width".to_string(), JsonValue::from(self.image_width));
        foreign_members.insert("image_height".to_string(), JsonValue::from(self.image_height));
        foreign_members.insert("shape_count".to_string(), JsonValue::from(self.shape_count));

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }

    pub fn to_geojson_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_geojson()?)?)
    }

    pub fn save_geojson(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_geojson_string()?)?;
        Ok(())
    }
}
