// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end pipeline tests over real files.

use std::fs;
use std::path::Path;

use gmlsplit_core::{CoordFormat, Document, ElementRole};
use gmlsplit_geodesy::{CrsTransform, Result as GeoResult};
use gmlsplit_processing::{
    split_city_model, split_document, BoundingRegion, SplitOptions, SplitSummary,
};

/// Pass-through transform so assertions can use source-CRS values.
struct Identity;

impl CrsTransform for Identity {
    fn transform(&self, x: f64, y: f64, z: f64) -> GeoResult<(f64, f64, f64)> {
        Ok((x, y, z))
    }
}

/// Rejects any point east of the cutoff, as a projection would reject
/// coordinates outside its domain.
struct FailsEastOf(f64);

impl CrsTransform for FailsEastOf {
    fn transform(&self, x: f64, y: f64, z: f64) -> GeoResult<(f64, f64, f64)> {
        if x > self.0 {
            return Err(gmlsplit_geodesy::Error::Transform(format!(
                "x {x} outside the projection domain"
            )));
        }
        Ok((x, y, z))
    }
}

fn two_building_model() -> Document {
    // Building A centers at (101, 101, 7); Building B lies far outside.
    Document::parse_str(
        r#"<core:CityModel xmlns:core="http://www.opengis.net/citygml/2.0" xmlns:gml="http://www.opengis.net/gml" xmlns:bldg="http://www.opengis.net/citygml/building/2.0">
  <gml:name>fixture</gml:name>
  <core:cityObjectMember>
    <bldg:Building gml:id="a">
      <gml:pos>100 100 5</gml:pos>
      <gml:pos>100 102 5</gml:pos>
      <gml:pos>102 100 5</gml:pos>
      <gml:pos>102 102 7</gml:pos>
    </bldg:Building>
    <bldg:Building gml:id="b">
      <gml:pos>5000 5000 2</gml:pos>
    </bldg:Building>
  </core:cityObjectMember>
</core:CityModel>"#,
    )
    .unwrap()
}

fn raw_options() -> SplitOptions {
    SplitOptions {
        bounds: BoundingRegion::new(0.0, 1000.0, 1000.0, 0.0),
        format: CoordFormat { strip_len: 0 },
    }
}

fn count_role(path: &Path, role: ElementRole) -> usize {
    let doc = Document::parse_file(path).unwrap();
    doc.root.find_descendants(role).len()
}

#[test]
fn test_two_building_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let model = two_building_model();

    let summary = split_document(&model, dir.path(), &Identity, raw_options()).unwrap();
    assert_eq!(
        summary,
        SplitSummary {
            written: 1,
            out_of_bounds: 1,
            failed: 0
        }
    );

    let written = dir.path().join("Building1.xml");
    assert!(written.exists());
    assert!(!dir.path().join("Building2.xml").exists());

    let xml = fs::read_to_string(&written).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<gml:pos srsDimension=\"3\">101 101 7</gml:pos>"));
    assert_eq!(xml.matches("unityReferencePoint").count(), 1);

    assert_eq!(count_role(&written, ElementRole::FeatureContainer), 1);
    assert_eq!(count_role(&written, ElementRole::Building), 1);
}

#[test]
fn test_empty_building_fails_alone() {
    let dir = tempfile::tempdir().unwrap();
    let model = Document::parse_str(
        r#"<core:CityModel xmlns:core="http://www.opengis.net/citygml/2.0" xmlns:gml="http://www.opengis.net/gml" xmlns:bldg="http://www.opengis.net/citygml/building/2.0">
  <core:cityObjectMember>
    <bldg:Building gml:id="hollow"><bldg:boundedBy/></bldg:Building>
    <bldg:Building gml:id="solid"><gml:pos>5 5 1</gml:pos></bldg:Building>
  </core:cityObjectMember>
</core:CityModel>"#,
    )
    .unwrap();

    let summary = split_document(&model, dir.path(), &Identity, raw_options()).unwrap();
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.written, 1);

    // The counter still advances past the failed building.
    assert!(!dir.path().join("Building1.xml").exists());
    assert!(dir.path().join("Building2.xml").exists());
}

#[test]
fn test_transform_failure_fails_one_building_only() {
    let dir = tempfile::tempdir().unwrap();
    let model = Document::parse_str(
        r#"<core:CityModel xmlns:core="http://www.opengis.net/citygml/2.0" xmlns:gml="http://www.opengis.net/gml" xmlns:bldg="http://www.opengis.net/citygml/building/2.0">
  <core:cityObjectMember>
    <bldg:Building gml:id="east"><gml:pos>700 700 1</gml:pos></bldg:Building>
    <bldg:Building gml:id="west"><gml:pos>10 10 1</gml:pos></bldg:Building>
  </core:cityObjectMember>
</core:CityModel>"#,
    )
    .unwrap();

    // Both buildings pass the bounds filter; only the first hits the
    // transform failure.
    let summary =
        split_document(&model, dir.path(), &FailsEastOf(500.0), raw_options()).unwrap();
    assert_eq!(
        summary,
        SplitSummary {
            written: 1,
            out_of_bounds: 0,
            failed: 1
        }
    );

    assert!(!dir.path().join("Building1.xml").exists());
    assert!(dir.path().join("Building2.xml").exists());
}

#[test]
fn test_no_template_leakage() {
    let dir = tempfile::tempdir().unwrap();
    let model = Document::parse_str(
        r#"<core:CityModel xmlns:core="http://www.opengis.net/citygml/2.0" xmlns:gml="http://www.opengis.net/gml" xmlns:bldg="http://www.opengis.net/citygml/building/2.0">
  <core:cityObjectMember>
    <bldg:Building gml:id="first"><gml:pos>1 1 1</gml:pos></bldg:Building>
  </core:cityObjectMember>
  <core:cityObjectMember>
    <bldg:Building gml:id="second"><gml:pos>2 2 2</gml:pos></bldg:Building>
  </core:cityObjectMember>
</core:CityModel>"#,
    )
    .unwrap();

    let summary = split_document(&model, dir.path(), &Identity, raw_options()).unwrap();
    assert_eq!(summary.written, 2);

    let first = fs::read_to_string(dir.path().join("Building1.xml")).unwrap();
    let second = fs::read_to_string(dir.path().join("Building2.xml")).unwrap();
    assert!(first.contains("gml:id=\"first\"") && !first.contains("gml:id=\"second\""));
    assert!(second.contains("gml:id=\"second\"") && !second.contains("gml:id=\"first\""));
    assert_eq!(count_role(&dir.path().join("Building2.xml"), ElementRole::Building), 1);
}

#[test]
fn test_runs_are_byte_identical() {
    let input_dir = tempfile::tempdir().unwrap();
    let input = input_dir.path().join("model.xml");
    two_building_model().write_file(&input).unwrap();

    let run = |out: &Path| {
        let summary = split_city_model(&input, out, &Identity, raw_options()).unwrap();
        assert_eq!(summary.written, 1);
        fs::read(out.join("Building1.xml")).unwrap()
    };

    let out_a = tempfile::tempdir().unwrap();
    let out_b = tempfile::tempdir().unwrap();
    assert_eq!(run(out_a.path()), run(out_b.path()));
}

#[test]
fn test_prefixed_coordinates_with_default_format() {
    let dir = tempfile::tempdir().unwrap();
    let model = Document::parse_str(
        r#"<core:CityModel xmlns:core="http://www.opengis.net/citygml/2.0" xmlns:gml="http://www.opengis.net/gml" xmlns:bldg="http://www.opengis.net/citygml/building/2.0">
  <core:cityObjectMember>
    <bldg:Building gml:id="zoned"><gml:pos>32500 400 9</gml:pos></bldg:Building>
  </core:cityObjectMember>
</core:CityModel>"#,
    )
    .unwrap();

    let options = SplitOptions {
        bounds: BoundingRegion::new(0.0, 1000.0, 1000.0, 0.0),
        format: CoordFormat::default(),
    };
    let summary = split_document(&model, dir.path(), &Identity, options).unwrap();
    assert_eq!(summary.written, 1);

    let xml = fs::read_to_string(dir.path().join("Building1.xml")).unwrap();
    // The zone prefix is stripped before the reference point is formed.
    assert!(xml.contains("<gml:pos srsDimension=\"3\">500 400 9</gml:pos>"));
}
