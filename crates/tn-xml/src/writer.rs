//! SUMO `.net.xml` rendering.
//!
//! # Document layout
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <net version="1.20" ...>
//!     <edge id="N_0_0" function="internal"> <lane .../> </edge>   internal edges
//!     <edge id="-E_0_1" from="N_0" to="N_1" ...> <lane/> </edge>  road edges
//!     <tlLogic id="N_0" ...> <phase .../> </tlLogic>              signal programs
//!     <junction id="N_0" type="traffic_light" .../>               junctions
//!     <connection ... linkIndex="0" via="N_0_0_0" tl="N_0"/>       via connections
//!     <connection from="N_0_0" .../>                               internal connections
//! </net>
//! ```
//!
//! Numbers use Rust's shortest round-trip formatting, so reading a written
//! document back yields bit-identical values.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use tn_realize::{
    InternalConnection, InternalEdge, Junction, Lane, Network, RoadEdge, TlLogic, ViaConnection,
};

use crate::XmlResult;
use crate::attrs::format_shape;

const NET_ATTRIBUTES: [(&str, &str); 5] = [
    ("version", "1.20"),
    ("junctionCornerDetail", "5"),
    ("limitTurnSpeed", "5.50"),
    ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
    ("xsi:noNamespaceSchemaLocation", "http://sumo.dlr.de/xsd/net_file.xsd"),
];

// ── Element helpers ───────────────────────────────────────────────────────────

pub(crate) fn element(name: &str, attrs: &[(&str, String)]) -> BytesStart<'static> {
    let mut start = BytesStart::new(name.to_owned());
    for (key, value) in attrs {
        start.push_attribute((*key, value.as_str()));
    }
    start
}

pub(crate) fn write_empty<W: Write>(w: &mut Writer<W>, name: &str, attrs: &[(&str, String)]) -> XmlResult<()> {
    w.write_event(Event::Empty(element(name, attrs)))?;
    Ok(())
}

/// Write `<name attrs>children</name>`, or `<name attrs/>` when there are
/// no children.
fn write_parent<W, T>(
    w:        &mut Writer<W>,
    name:     &str,
    attrs:    &[(&str, String)],
    children: &[T],
    child:    impl Fn(&mut Writer<W>, &T) -> XmlResult<()>,
) -> XmlResult<()>
where
    W: Write,
{
    if children.is_empty() {
        return write_empty(w, name, attrs);
    }
    w.write_event(Event::Start(element(name, attrs)))?;
    for c in children {
        child(w, c)?;
    }
    w.write_event(Event::End(BytesEnd::new(name.to_owned())))?;
    Ok(())
}

pub(crate) fn write_decl<W: Write>(w: &mut Writer<W>) -> XmlResult<()> {
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(())
}

// ── Network elements ──────────────────────────────────────────────────────────

fn write_lane<W: Write>(w: &mut Writer<W>, lane: &Lane) -> XmlResult<()> {
    write_empty(w, "lane", &[
        ("id",     lane.id.clone()),
        ("index",  lane.index.to_string()),
        ("speed",  lane.speed.to_string()),
        ("length", lane.length.to_string()),
        ("shape",  format_shape(&lane.shape)),
    ])
}

fn write_internal_edge<W: Write>(w: &mut Writer<W>, edge: &InternalEdge) -> XmlResult<()> {
    let attrs = [("id", edge.id.clone()), ("function", "internal".to_owned())];
    write_parent(w, "edge", &attrs, &edge.lanes, write_lane)
}

fn write_road_edge<W: Write>(w: &mut Writer<W>, edge: &RoadEdge) -> XmlResult<()> {
    let attrs = [
        ("id",         edge.id.clone()),
        ("from",       edge.from.clone()),
        ("to",         edge.to.clone()),
        ("priority",   "-1".to_owned()),
        ("spreadType", "center".to_owned()),
        ("shape",      format_shape(&edge.shape)),
    ];
    write_parent(w, "edge", &attrs, &edge.lanes, write_lane)
}

fn write_tl_logic<W: Write>(w: &mut Writer<W>, tl: &TlLogic) -> XmlResult<()> {
    let attrs = [
        ("id",        tl.id.clone()),
        ("type",      "static".to_owned()),
        ("programID", "0".to_owned()),
        ("offset",    "0".to_owned()),
    ];
    write_parent(w, "tlLogic", &attrs, &tl.phases, |w, phase| {
        write_empty(w, "phase", &[
            ("duration", phase.duration.to_string()),
            ("state",    phase.state.clone()),
        ])
    })
}

fn write_junction<W: Write>(w: &mut Writer<W>, junction: &Junction) -> XmlResult<()> {
    let attrs = [
        ("id",       junction.id.clone()),
        ("type",     junction.kind.as_str().to_owned()),
        ("x",        junction.point.x.to_string()),
        ("y",        junction.point.y.to_string()),
        ("incLanes", junction.inc_lanes.join(" ")),
        ("intLanes", junction.int_lanes.join(" ")),
    ];
    write_parent(w, "junction", &attrs, &junction.requests, |w, request| {
        write_empty(w, "request", &[
            ("index",    request.index.to_string()),
            ("response", request.response.clone()),
            ("foes",     request.foes.clone()),
            ("cont",     "0".to_owned()),
        ])
    })
}

fn write_via_connection<W: Write>(w: &mut Writer<W>, c: &ViaConnection) -> XmlResult<()> {
    let mut attrs = vec![
        ("from",      c.from_edge.clone()),
        ("to",        c.to_edge.clone()),
        ("fromLane",  c.from_lane.to_string()),
        ("toLane",    c.to_lane.to_string()),
        ("dir",       c.dir.clone()),
        ("state",     "M".to_owned()),
        ("linkIndex", c.link_index.to_string()),
        ("via",       c.via.clone()),
    ];
    if let Some(tl) = &c.tl {
        attrs.push(("tl", tl.clone()));
    }
    write_empty(w, "connection", &attrs)
}

fn write_internal_connection<W: Write>(w: &mut Writer<W>, c: &InternalConnection) -> XmlResult<()> {
    write_empty(w, "connection", &[
        ("from",     c.from_edge.clone()),
        ("to",       c.to_edge.clone()),
        ("fromLane", c.from_lane.to_string()),
        ("toLane",   c.to_lane.to_string()),
        ("dir",      c.dir.clone()),
        ("state",    "M".to_owned()),
    ])
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Write `network` as a complete `.net.xml` document to `sink`.
pub fn write_network<W: Write>(network: &Network, sink: W) -> XmlResult<()> {
    let mut w = Writer::new_with_indent(sink, b' ', 4);
    write_decl(&mut w)?;

    let root: Vec<(&str, String)> = NET_ATTRIBUTES.iter().map(|&(k, v)| (k, v.to_owned())).collect();
    w.write_event(Event::Start(element("net", &root)))?;

    for edge in &network.internal_edges {
        write_internal_edge(&mut w, edge)?;
    }
    for edge in &network.road_edges {
        write_road_edge(&mut w, edge)?;
    }
    for tl in &network.tl_logics {
        write_tl_logic(&mut w, tl)?;
    }
    for junction in &network.junctions {
        write_junction(&mut w, junction)?;
    }
    for connection in &network.via_connections {
        write_via_connection(&mut w, connection)?;
    }
    for connection in &network.internal_connections {
        write_internal_connection(&mut w, connection)?;
    }

    w.write_event(Event::End(BytesEnd::new("net")))?;
    w.get_mut().write_all(b"\n")?;
    Ok(())
}

/// Render `network` to a `String`.
pub fn network_to_string(network: &Network) -> XmlResult<String> {
    let mut buf = Vec::new();
    write_network(network, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write `network` to `path`, creating or truncating the file.
pub fn write_network_file(network: &Network, path: &Path) -> XmlResult<()> {
    let mut sink = BufWriter::new(File::create(path)?);
    write_network(network, &mut sink)?;
    sink.flush()?;
    tracing::info!(path = %path.display(), junctions = network.junctions.len(), "network written");
    Ok(())
}
