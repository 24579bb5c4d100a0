// tests/map_tests.rs

use macroquad::math::vec2;
use tmx_layout::{decode, decode_tmx_to_ir, Gid, MapError, PropertyType};

const MAP_3X2: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<map width="3" height="2" tilewidth="32" tileheight="32">
 <layer name="ground" width="3" height="2">
  <data>
   <tile gid="3"/><tile gid="0"/><tile gid="0"/>
   <tile gid="0"/><tile gid="0"/><tile gid="1"/>
  </data>
 </layer>
</map>
"#;

#[test]
fn coordinate_transform_flips_rows() {
    let layout = decode(MAP_3X2).expect("decode");
    let tiles = &layout.layers()[0].tiles;

    assert_eq!(tiles.len(), 2);
    assert_eq!((tiles[0].row, tiles[0].column), (0, 0));
    assert_eq!(tiles[0].gid, Gid(2));
    assert_eq!(tiles[0].position, vec2(0.0, 64.0));

    assert_eq!((tiles[1].row, tiles[1].column), (1, 2));
    assert_eq!(tiles[1].gid, Gid(0));
    assert_eq!(tiles[1].position, vec2(64.0, 32.0));
}

#[test]
fn gid_offset_law_and_grid_length() {
    let ir = decode_tmx_to_ir(MAP_3X2).expect("decode");
    let layer = &ir.layers[0];

    assert_eq!(layer.cells.len(), (layer.width * layer.height) as usize);
    let gids: Vec<Gid> = layer.cells.iter().map(|c| c.gid).collect();
    assert_eq!(gids, [Gid(2), Gid::EMPTY, Gid::EMPTY, Gid::EMPTY, Gid::EMPTY, Gid(0)]);
}

#[test]
fn decode_is_deterministic() {
    let a = decode(MAP_3X2).expect("decode");
    let b = decode(MAP_3X2).expect("decode");
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn sorting_order_defaults_to_zero() {
    let tmx = r#"<map width="1" height="1" tilewidth="8" tileheight="8">
 <layer name="plain" width="1" height="1"><data><tile gid="1"/></data></layer>
 <layer name="raised" width="1" height="1">
  <properties><property name="sortingOrder" value="5"/></properties>
  <data><tile gid="1"/></data>
 </layer>
 <objectgroup name="g1"/>
 <objectgroup name="g2">
  <properties><property name="sortingOrder" value="-3"/></properties>
 </objectgroup>
</map>"#;
    let layout = decode(tmx).expect("decode");

    let orders: Vec<i32> = layout.layers().iter().map(|l| l.sorting_order).collect();
    assert_eq!(orders, [0, 5]);
    let orders: Vec<i32> = layout.collider_groups().iter().map(|g| g.sorting_order).collect();
    assert_eq!(orders, [0, -3]);
}

fn trigger_map(value: Option<&str>) -> String {
    let props = value
        .map(|v| format!(r#"<properties><property name="isTriggered" value="{v}"/></properties>"#))
        .unwrap_or_default();
    format!(
        r#"<map width="2" height="2" tilewidth="16" tileheight="16">
 <objectgroup name="walls">
  <object name="box" x="16" y="0" width="16" height="32">{props}</object>
 </objectgroup>
</map>"#
    )
}

#[test]
fn trigger_property_law() {
    let on = decode(&trigger_map(Some("true"))).expect("decode");
    assert!(on.colliders().all(|c| c.is_trigger));

    let off = decode(&trigger_map(None)).expect("decode");
    assert_eq!(off.colliders().count(), 1);
    assert!(off.colliders().all(|c| !c.is_trigger));

    let err = decode(&trigger_map(Some("notabool"))).unwrap_err();
    assert!(matches!(
        err,
        MapError::InvalidPropertyValue { ref element, ref property, expected: PropertyType::Bool, .. }
            if element == "object" && property == "isTriggered"
    ));
}

#[test]
fn box_collider_is_in_cells() {
    let layout = decode(&trigger_map(None)).expect("decode");
    let collider = layout.colliders().next().expect("collider");

    assert_eq!(collider.position, vec2(1.0, 1.0));
    assert_eq!(collider.size(), Some(vec2(1.0, 2.0)));
    assert_eq!(collider.gid(), None);
}

#[test]
fn missing_layer_width_fails_whole_decode() {
    let tmx = r#"<map width="1" height="1" tilewidth="8" tileheight="8">
 <layer name="broken" height="1"><data><tile gid="1"/></data></layer>
</map>"#;
    let err = decode(tmx).unwrap_err();
    assert!(matches!(
        err,
        MapError::MissingAttribute { ref element, name: "width" } if element == "layer"
    ));
}

#[test]
fn missing_tile_gid_is_reported() {
    let tmx = r#"<map width="1" height="1" tilewidth="8" tileheight="8">
 <layer name="L" width="1" height="1"><data><tile/></data></layer>
</map>"#;
    let err = decode(tmx).unwrap_err();
    assert!(matches!(
        err,
        MapError::MissingAttribute { ref element, name: "gid" } if element == "tile"
    ));
}

#[test]
fn bare_object_is_not_an_error() {
    let tmx = r#"<map width="1" height="1" tilewidth="8" tileheight="8">
 <objectgroup name="markers"><object name="spawn" x="4" y="4"/></objectgroup>
</map>"#;
    let layout = decode(tmx).expect("decode");
    assert_eq!(layout.collider_groups().len(), 1);
    assert_eq!(layout.colliders().count(), 0);

    let ir = decode_tmx_to_ir(tmx).expect("decode");
    assert_eq!(ir.object_groups[0].objects[0].name, "spawn");
}

#[test]
fn every_object_group_is_decoded() {
    let tmx = r#"<map width="1" height="1" tilewidth="8" tileheight="8">
 <objectgroup name="a"><object name="o1" gid="1" x="0" y="8"/></objectgroup>
 <objectgroup name="b"><object name="o2" gid="2" x="0" y="8"/></objectgroup>
</map>"#;
    let layout = decode(tmx).expect("decode");
    let gids: Vec<Option<Gid>> = layout.colliders().map(|c| c.gid()).collect();
    assert_eq!(gids, [Some(Gid(0)), Some(Gid(1))]);
}

#[test]
fn error_on_malformed_xml() {
    let err = decode("<map width=\"1\"").unwrap_err();
    assert!(matches!(err, MapError::MalformedDocument(_)));
}

#[test]
fn error_on_missing_map() {
    let err = decode("<tileset name=\"x\"/>").unwrap_err();
    assert!(matches!(err, MapError::MissingMapElement));
}

#[test]
fn error_on_non_numeric_dimension() {
    let err = decode(r#"<map width="wide" height="1" tilewidth="8" tileheight="8"/>"#).unwrap_err();
    assert!(matches!(
        err,
        MapError::InvalidNumber { ref element, name: "width", ref value }
            if element == "map" && value == "wide"
    ));
}

const BAD_LAYER_SIZE: &str = r#"<map width="2" height="2" tilewidth="8" tileheight="8">
 <layer name="oops" width="2" height="2">
  <data><tile gid="1"/><tile gid="2"/><tile gid="3"/></data>
 </layer>
</map>"#;

#[test]
fn error_on_layer_size_mismatch() {
    let err = decode(BAD_LAYER_SIZE).unwrap_err();
    assert!(matches!(
        err,
        MapError::InvalidLayerSize { ref layer, expected: 4, found: 3 } if layer == "oops"
    ));
}

#[test]
fn layer_dimensions_govern_grid_length() {
    let tmx = r#"<map width="4" height="4" tilewidth="8" tileheight="8">
 <layer name="strip" width="2" height="1"><data><tile gid="1"/><tile gid="1"/></data></layer>
</map>"#;
    let layout = decode(tmx).expect("mismatched layers still decode");
    let tiles = &layout.layers()[0].tiles;
    assert_eq!(tiles.len(), 2);
    assert_eq!(tiles[1].position, vec2(8.0, 8.0));
}

#[test]
fn load_allows_empty_layer_name_and_extra_attributes() {
    let tmx = r#"<map width="1" height="1" tilewidth="8" tileheight="8" dummy="ignored">
 <layer width="1" height="1" opacity="0.5"><data><tile gid="1"/></data></layer>
</map>"#;
    let layout = decode(tmx).unwrap();
    assert_eq!(layout.layers()[0].name, "");
}
