//! SUMO `.net.xml` parsing.
//!
//! Reads the subset of the net schema produced by [`crate::writer`] back
//! into a [`Network`].  Elements outside that subset (`<location>`,
//! `<type>`, …) are skipped, so hand-edited or simulator-written files with
//! extra content still load.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use tn_realize::{
    InternalConnection, InternalEdge, Junction, JunctionKind, Lane, Network, Phase, Request,
    RoadEdge, TlLogic, ViaConnection,
};

use crate::attrs::Attrs;
use crate::{XmlError, XmlResult};

/// Container element currently being filled.
enum Open {
    Road(RoadEdge),
    Internal(InternalEdge),
    Junction(Junction),
    TlLogic(TlLogic),
}

impl Open {
    fn name(&self) -> &'static str {
        match self {
            Open::Road(_) | Open::Internal(_) => "edge",
            Open::Junction(_)                => "junction",
            Open::TlLogic(_)                 => "tlLogic",
        }
    }

    fn close(self, network: &mut Network) {
        match self {
            Open::Road(e)     => network.road_edges.push(e),
            Open::Internal(e) => network.internal_edges.push(e),
            Open::Junction(j) => network.junctions.push(j),
            Open::TlLogic(t)  => network.tl_logics.push(t),
        }
    }
}

/// Progress through the `<net>` root element.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Root {
    Missing,
    Open,
    Closed,
}

struct NetReader {
    network: Network,
    root:    Root,
    open:    Option<Open>,
}

impl NetReader {
    fn element(&mut self, start: &BytesStart<'_>, empty: bool) -> XmlResult<()> {
        let a = Attrs::of(start)?;
        match a.element() {
            "net" => {
                self.root = if empty { Root::Closed } else { Root::Open };
                Ok(())
            }
            "edge"       => self.container(edge(&a)?, empty),
            "junction"   => self.container(Open::Junction(junction(&a)?), empty),
            "tlLogic"    => self.container(Open::TlLogic(TlLogic { id: a.string("id")?, phases: Vec::new() }), empty),
            "lane"       => self.lane(&a),
            "phase"      => self.phase(&a),
            "request"    => self.request(&a),
            "connection" => self.connection(&a),
            _ => Ok(()),
        }
    }

    fn container(&mut self, open: Open, empty: bool) -> XmlResult<()> {
        if let Some(parent) = &self.open {
            return Err(XmlError::Misplaced { element: open.name().to_owned(), parent: parent.name().to_owned() });
        }
        if empty {
            open.close(&mut self.network);
        } else {
            self.open = Some(open);
        }
        Ok(())
    }

    fn end(&mut self, name: &[u8]) {
        if name == b"net" {
            self.root = Root::Closed;
        }
        if self.open.as_ref().is_some_and(|o| o.name().as_bytes() == name) {
            if let Some(open) = self.open.take() {
                open.close(&mut self.network);
            }
        }
    }

    /// The finished network, provided every element was closed.
    fn finish(self) -> XmlResult<Network> {
        if let Some(open) = &self.open {
            return Err(XmlError::Truncated { element: open.name().to_owned() });
        }
        if self.root != Root::Closed {
            return Err(XmlError::Truncated { element: "net".to_owned() });
        }
        Ok(self.network)
    }

    fn misplaced(&self, a: &Attrs) -> XmlError {
        XmlError::Misplaced {
            element: a.element().to_owned(),
            parent:  self.open.as_ref().map_or("net", Open::name).to_owned(),
        }
    }

    fn lane(&mut self, a: &Attrs) -> XmlResult<()> {
        let lane = Lane {
            id:     a.string("id")?,
            index:  a.num("index")?,
            speed:  a.num("speed")?,
            length: a.num("length")?,
            shape:  a.shape("shape")?,
        };
        match &mut self.open {
            Some(Open::Road(e))     => e.lanes.push(lane),
            Some(Open::Internal(e)) => e.lanes.push(lane),
            _ => return Err(self.misplaced(a)),
        }
        Ok(())
    }

    fn phase(&mut self, a: &Attrs) -> XmlResult<()> {
        let phase = Phase { duration: a.num("duration")?, state: a.string("state")? };
        match &mut self.open {
            Some(Open::TlLogic(t)) => t.phases.push(phase),
            _ => return Err(self.misplaced(a)),
        }
        Ok(())
    }

    fn request(&mut self, a: &Attrs) -> XmlResult<()> {
        let request = Request {
            index:    a.num("index")?,
            response: a.string("response")?,
            foes:     a.string("foes")?,
        };
        match &mut self.open {
            Some(Open::Junction(j)) => j.requests.push(request),
            _ => return Err(self.misplaced(a)),
        }
        Ok(())
    }

    /// A connection with a `via` lane is a via connection; one without is an
    /// internal connection.
    fn connection(&mut self, a: &Attrs) -> XmlResult<()> {
        if self.open.is_some() {
            return Err(self.misplaced(a));
        }
        let from_edge = a.string("from")?;
        let to_edge = a.string("to")?;
        let from_lane = a.num("fromLane")?;
        let to_lane = a.num("toLane")?;
        let dir = a.string("dir")?;

        match a.get("via") {
            Some(via) => self.network.via_connections.push(ViaConnection {
                from_edge,
                to_edge,
                from_lane,
                to_lane,
                dir,
                link_index: a.num("linkIndex")?,
                via:        via.to_owned(),
                tl:         a.get("tl").map(str::to_owned),
            }),
            None => self.network.internal_connections.push(InternalConnection {
                from_edge,
                to_edge,
                from_lane,
                to_lane,
                dir,
            }),
        }
        Ok(())
    }
}

fn edge(a: &Attrs) -> XmlResult<Open> {
    let id = a.string("id")?;
    if a.get("function") == Some("internal") {
        return Ok(Open::Internal(InternalEdge { id, lanes: Vec::new() }));
    }
    Ok(Open::Road(RoadEdge {
        id,
        from:  a.string("from")?,
        to:    a.string("to")?,
        shape: a.shape("shape")?,
        lanes: Vec::new(),
    }))
}

fn junction(a: &Attrs) -> XmlResult<Junction> {
    let kind_name = a.req("type")?;
    let kind = JunctionKind::from_name(kind_name).ok_or_else(|| XmlError::Parse {
        element:   a.element().to_owned(),
        attribute: "type",
        value:     kind_name.to_owned(),
    })?;
    Ok(Junction {
        id:        a.string("id")?,
        kind,
        point:     tn_core::Point::new(a.num("x")?, a.num("y")?),
        inc_lanes: a.list("incLanes"),
        int_lanes: a.list("intLanes"),
        requests:  Vec::new(),
    })
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a `.net.xml` document held in memory.
///
/// # Errors
///
/// [`XmlError::Truncated`] when the document ends before `</net>` or inside
/// an edge, junction or signal program.
pub fn read_network_str(xml: &str) -> XmlResult<Network> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut state = NetReader { network: Network::default(), root: Root::Missing, open: None };
    loop {
        match reader.read_event()? {
            Event::Start(start) => state.element(&start, false)?,
            Event::Empty(start) => state.element(&start, true)?,
            Event::End(end)     => state.end(end.name().as_ref()),
            Event::Eof          => break,
            _ => {}
        }
    }
    state.finish()
}

/// Parse a `.net.xml` document from any `Read` source.
pub fn read_network<R: Read>(mut source: R) -> XmlResult<Network> {
    let mut xml = String::new();
    source.read_to_string(&mut xml)?;
    read_network_str(&xml)
}

/// Parse the `.net.xml` file at `path`.
pub fn read_network_file(path: &Path) -> XmlResult<Network> {
    let network = read_network(BufReader::new(File::open(path)?))?;
    tracing::debug!(
        path       = %path.display(),
        junctions  = network.junctions.len(),
        road_edges = network.road_edges.len(),
        "network read",
    );
    Ok(network)
}
