// src/loader/tmx_loader.rs
use crate::error::MapError;
use crate::ir_map::*;
use crate::properties::Properties;
use log::{debug, trace, warn};
use roxmltree::{Document, Node};
use std::path::Path;
use std::str::FromStr;

const SORTING_ORDER: &str = "sortingOrder";
const IS_TRIGGERED: &str = "isTriggered";

fn tag<'input>(node: Node<'_, 'input>) -> &'input str {
    node.tag_name().name()
}

fn required_attr<'a>(node: Node<'a, '_>, name: &'static str) -> Result<&'a str, MapError> {
    node.attribute(name).ok_or_else(|| MapError::MissingAttribute {
        element: tag(node).to_owned(),
        name,
    })
}

fn parse_value<T: FromStr>(node: Node, name: &'static str, raw: &str) -> Result<T, MapError> {
    raw.trim().parse().map_err(|_| MapError::InvalidNumber {
        element: tag(node).to_owned(),
        name,
        value: raw.to_owned(),
    })
}

fn parse_attr<T: FromStr>(node: Node, name: &'static str) -> Result<T, MapError> {
    parse_value(node, name, required_attr(node, name)?)
}

fn parse_opt_attr<T: FromStr>(node: Node, name: &'static str) -> Result<Option<T>, MapError> {
    node.attribute(name)
        .map(|raw| parse_value(node, name, raw))
        .transpose()
}

fn parse_opt_coord(node: Node, name: &'static str) -> Result<Option<f32>, MapError> {
    match parse_opt_attr::<f32>(node, name)? {
        Some(v) if !v.is_finite() => Err(MapError::InvalidNumber {
            element: tag(node).to_owned(),
            name,
            value: node.attribute(name).unwrap_or_default().to_owned(),
        }),
        v => Ok(v),
    }
}

fn parse_positive(node: Node, name: &'static str) -> Result<u32, MapError> {
    match parse_attr::<u32>(node, name)? {
        0 => Err(MapError::InvalidNumber {
            element: tag(node).to_owned(),
            name,
            value: node.attribute(name).unwrap_or_default().to_owned(),
        }),
        v => Ok(v),
    }
}

fn sorting_order(node: Node, properties: &Properties) -> Result<i32, MapError> {
    Ok(properties.resolve::<i32>(tag(node), SORTING_ORDER)?.unwrap_or(0))
}

fn parse_map_info(map_node: Node) -> Result<MapInfo, MapError> {
    Ok(MapInfo {
        width: parse_positive(map_node, "width")?,
        height: parse_positive(map_node, "height")?,
        tile_width: parse_positive(map_node, "tilewidth")?,
        tile_height: parse_positive(map_node, "tileheight")?,
    })
}

fn parse_layer(layer_node: Node) -> Result<LayerInfo, MapError> {
    let name = layer_node.attribute("name").unwrap_or_default().to_owned();
    let width: u32 = parse_attr(layer_node, "width")?;
    let height: u32 = parse_attr(layer_node, "height")?;

    let data = layer_node
        .children()
        .find(|c| c.has_tag_name("data"))
        .ok_or_else(|| MapError::MissingElement {
            element: tag(layer_node).to_owned(),
            child: "data",
        })?;

    if let Some(encoding) = data
        .attribute("encoding")
        .or_else(|| data.attribute("compression"))
    {
        return Err(MapError::UnsupportedEncoding {
            layer: name,
            encoding: encoding.to_owned(),
        });
    }

    let cells = data
        .children()
        .filter(|c| c.is_element())
        .map(|tile| -> Result<GridCell, MapError> {
            let raw: u32 = parse_attr(tile, "gid")?;
            Ok(GridCell {
                gid: Gid::from_raw(raw),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let expected = width as usize * height as usize;
    if cells.len() != expected {
        return Err(MapError::InvalidLayerSize {
            layer: name,
            expected,
            found: cells.len(),
        });
    }

    let properties = Properties::from_node(layer_node);
    let sorting_order = sorting_order(layer_node, &properties)?;

    trace!("decoded layer '{name}' ({width}x{height}, sortingOrder {sorting_order})");

    Ok(LayerInfo {
        name,
        width,
        height,
        sorting_order,
        properties,
        cells,
    })
}

fn parse_object(object_node: Node) -> Result<ObjectSpec, MapError> {
    let properties = Properties::from_node(object_node);
    let is_triggered = properties
        .resolve::<bool>(tag(object_node), IS_TRIGGERED)?
        .unwrap_or(false);

    Ok(ObjectSpec {
        name: object_node.attribute("name").unwrap_or_default().to_owned(),
        // Tiled 1.9 renamed `type` to `class`
        kind: object_node
            .attribute("type")
            .or_else(|| object_node.attribute("class"))
            .map(str::to_owned),
        gid: parse_opt_attr::<u32>(object_node, "gid")?.map(Gid::from_raw),
        x: parse_opt_coord(object_node, "x")?.unwrap_or(0.0),
        y: parse_opt_coord(object_node, "y")?.unwrap_or(0.0),
        width: parse_opt_coord(object_node, "width")?,
        height: parse_opt_coord(object_node, "height")?,
        is_triggered,
        properties,
    })
}

fn parse_object_group(group_node: Node) -> Result<ObjectGroupInfo, MapError> {
    let properties = Properties::from_node(group_node);
    let sorting_order = sorting_order(group_node, &properties)?;
    let objects = group_node
        .children()
        .filter(|c| c.has_tag_name("object"))
        .map(parse_object)
        .collect::<Result<Vec<_>, _>>()?;

    let name = group_node.attribute("name").unwrap_or_default().to_owned();
    trace!("decoded object group '{name}' ({} objects)", objects.len());

    Ok(ObjectGroupInfo {
        name,
        sorting_order,
        properties,
        objects,
    })
}

/// Walks the map's layer list in document order, flattening `<group>` containers.
/// Tileset-local object groups are not map content and are never visited.
fn collect_layers<'a, 'input>(
    parent: Node<'a, 'input>,
    layers: &mut Vec<Node<'a, 'input>>,
    groups: &mut Vec<Node<'a, 'input>>,
) {
    for child in parent.children().filter(|c| c.is_element()) {
        match tag(child) {
            "layer" => layers.push(child),
            "objectgroup" => groups.push(child),
            "group" => collect_layers(child, layers, groups),
            _ => {}
        }
    }
}

/// Decodes TMX text into the intermediate representation.
///
/// Pure: performs no I/O and keeps no state between calls.
pub fn decode_tmx_to_ir(text: &str) -> Result<IrMap, MapError> {
    let doc = Document::parse(text)?;
    let map_node = doc
        .descendants()
        .find(|n| n.has_tag_name("map"))
        .ok_or(MapError::MissingMapElement)?;

    let info = parse_map_info(map_node)?;

    let mut layer_nodes = Vec::new();
    let mut group_nodes = Vec::new();
    collect_layers(map_node, &mut layer_nodes, &mut group_nodes);

    let layers = layer_nodes
        .into_iter()
        .map(parse_layer)
        .collect::<Result<Vec<_>, _>>()?;

    for layer in &layers {
        if layer.width != info.width || layer.height != info.height {
            warn!(
                "layer '{}' is {}x{} but the map is {}x{}",
                layer.name, layer.width, layer.height, info.width, info.height
            );
        }
    }

    let object_groups = group_nodes
        .into_iter()
        .map(parse_object_group)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "decoded {}x{} map: {} layers, {} object groups",
        info.width,
        info.height,
        layers.len(),
        object_groups.len()
    );

    Ok(IrMap {
        info,
        layers,
        object_groups,
    })
}

/// Reads a `.tmx` file and decodes it.
pub fn load_map_file(path: impl AsRef<Path>) -> Result<IrMap, MapError> {
    let p = path.as_ref();
    if p.extension().and_then(|e| e.to_str()) != Some("tmx") {
        return Err(MapError::UnsupportedFormat(p.display().to_string()));
    }

    let txt = std::fs::read_to_string(p).map_err(|source| MapError::Io {
        path: p.to_path_buf(),
        source,
    })?;
    decode_tmx_to_ir(&txt)
}
