//! Traffic demand documents: junction-to-junction flows and the simulation
//! configuration that ties a network to its routes.
//!
//! Demand itself is produced elsewhere; this module only renders and reads
//! the documents and checks that every flow refers to junctions that exist
//! in the compiled network.
//!
//! # Routes document
//!
//! ```xml
//! <routes xmlns:xsi="..." xsi:noNamespaceSchemaLocation="http://sumo.dlr.de/xsd/routes_file.xsd">
//!     <flow id="JF0" begin="0" fromJunction="N_1" toJunction="N_3" end="600"
//!           vehsPerHour="300" departLane="free"/>
//! </routes>
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::events::{BytesEnd, Event};
use quick_xml::{Reader, Writer};

use tn_realize::Network;

use crate::attrs::Attrs;
use crate::writer::{element, write_decl, write_empty};
use crate::{DemandError, XmlResult};

pub const ROUTES_FILE: &str = "routes.rou.xml";
pub const SIMULATION_FILE: &str = "simulation.sumocfg";

const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// A stream of vehicles between two junctions over `[begin, end)` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct JunctionFlow {
    pub id:            String,
    pub begin:         u32,
    pub end:           u32,
    pub from_junction: String,
    pub to_junction:   String,
    pub vehs_per_hour: u32,
    /// Usually `0.0` to build an artificial queue at the destination.
    pub arrival_speed: Option<f64>,
}

impl JunctionFlow {
    pub fn new(
        id:            impl Into<String>,
        from_junction: impl Into<String>,
        to_junction:   impl Into<String>,
        begin:         u32,
        end:           u32,
        vehs_per_hour: u32,
    ) -> Self {
        Self {
            id: id.into(),
            begin,
            end,
            from_junction: from_junction.into(),
            to_junction: to_junction.into(),
            vehs_per_hour,
            arrival_speed: None,
        }
    }

    pub fn with_arrival_speed(mut self, speed: f64) -> Self {
        self.arrival_speed = Some(speed);
        self
    }

    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.begin)
    }

    /// Shift the whole interval by `delta` seconds, keeping its duration.
    ///
    /// # Errors
    ///
    /// [`DemandError::IntervalOverflow`] if the shifted end does not fit in
    /// `u32`; the flow is left unchanged.
    pub fn relocate(&mut self, delta: u32) -> Result<(), DemandError> {
        match (self.begin.checked_add(delta), self.end.checked_add(delta)) {
            (Some(begin), Some(end)) => {
                self.begin = begin;
                self.end = end;
                Ok(())
            }
            _ => Err(DemandError::IntervalOverflow { flow: self.id.clone(), delta }),
        }
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Check every flow against `network`.
///
/// # Errors
///
/// The first flow whose interval is reversed or whose endpoint is not a
/// junction of `network`.
pub fn validate_flows(network: &Network, flows: &[JunctionFlow]) -> Result<(), DemandError> {
    for flow in flows {
        if flow.end < flow.begin {
            return Err(DemandError::InvalidInterval {
                flow:  flow.id.clone(),
                begin: flow.begin,
                end:   flow.end,
            });
        }
        for junction in [&flow.from_junction, &flow.to_junction] {
            if network.junction(junction).is_none() {
                return Err(DemandError::UnknownJunction {
                    flow:     flow.id.clone(),
                    junction: junction.clone(),
                });
            }
        }
    }
    Ok(())
}

// ── Routes ────────────────────────────────────────────────────────────────────

/// Write a routes document holding `flows`.
pub fn write_routes<W: Write>(flows: &[JunctionFlow], sink: W) -> XmlResult<()> {
    let mut w = Writer::new_with_indent(sink, b' ', 4);
    write_decl(&mut w)?;
    w.write_event(Event::Start(element("routes", &[
        ("xmlns:xsi",                     XSI.to_owned()),
        ("xsi:noNamespaceSchemaLocation", "http://sumo.dlr.de/xsd/routes_file.xsd".to_owned()),
    ])))?;

    for flow in flows {
        let mut attrs = vec![
            ("id",           flow.id.clone()),
            ("begin",        flow.begin.to_string()),
            ("fromJunction", flow.from_junction.clone()),
            ("toJunction",   flow.to_junction.clone()),
            ("end",          flow.end.to_string()),
            ("vehsPerHour",  flow.vehs_per_hour.to_string()),
            ("departLane",   "free".to_owned()),
        ];
        if let Some(speed) = flow.arrival_speed {
            attrs.push(("arrivalSpeed", speed.to_string()));
        }
        write_empty(&mut w, "flow", &attrs)?;
    }

    w.write_event(Event::End(BytesEnd::new("routes")))?;
    w.get_mut().write_all(b"\n")?;
    Ok(())
}

pub fn write_routes_file(flows: &[JunctionFlow], path: &Path) -> XmlResult<()> {
    let mut sink = BufWriter::new(File::create(path)?);
    write_routes(flows, &mut sink)?;
    sink.flush()?;
    Ok(())
}

/// Read every `<flow>` of a routes document.  Other elements are skipped.
pub fn read_routes_str(xml: &str) -> XmlResult<Vec<JunctionFlow>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut flows = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Start(start) | Event::Empty(start) if start.name().as_ref() == b"flow" => {
                let a = Attrs::of(&start)?;
                flows.push(JunctionFlow {
                    id:            a.string("id")?,
                    begin:         a.num("begin")?,
                    end:           a.num("end")?,
                    from_junction: a.string("fromJunction")?,
                    to_junction:   a.string("toJunction")?,
                    vehs_per_hour: a.num("vehsPerHour")?,
                    arrival_speed: a.opt_num("arrivalSpeed")?,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(flows)
}

pub fn read_routes_file(path: &Path) -> XmlResult<Vec<JunctionFlow>> {
    read_routes_str(&fs::read_to_string(path)?)
}

// ── Simulation configuration ──────────────────────────────────────────────────

/// Write a `.sumocfg` pointing at `network.net.xml` and `routes.rou.xml` in
/// the same directory.
pub fn write_simulation_config<W: Write>(sink: W) -> XmlResult<()> {
    let mut w = Writer::new_with_indent(sink, b' ', 4);
    write_decl(&mut w)?;
    w.write_event(Event::Start(element("configuration", &[
        ("xmlns:xsi",                     XSI.to_owned()),
        ("xsi:noNamespaceSchemaLocation", "http://sumo.dlr.de/xsd/sumoConfiguration.xsd".to_owned()),
    ])))?;
    w.write_event(Event::Start(element("input", &[])))?;
    write_empty(&mut w, "junction-taz", &[("value", "true".to_owned())])?;
    write_empty(&mut w, "max-depart-delay", &[("value", "5".to_owned())])?;
    write_empty(&mut w, "net-file", &[("value", crate::summary::NETWORK_FILE.to_owned())])?;
    write_empty(&mut w, "route-files", &[("value", ROUTES_FILE.to_owned())])?;
    w.write_event(Event::End(BytesEnd::new("input")))?;
    w.write_event(Event::End(BytesEnd::new("configuration")))?;
    w.get_mut().write_all(b"\n")?;
    Ok(())
}

pub fn write_simulation_config_file(path: &Path) -> XmlResult<()> {
    let mut sink = BufWriter::new(File::create(path)?);
    write_simulation_config(&mut sink)?;
    sink.flush()?;
    Ok(())
}
