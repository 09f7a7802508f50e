use span_core::cable::Cable;
use span_core::types::UnitSystem;
use span_core::xml::{CableXmlHandler, XmlNode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cable = Cable {
        name: "795 ACSR".into(),
        construction: "ACSR 26/7".into(),
        area_electrical: 0.005516,
        area_physical: 0.7264 / 144.0,
        diameter: 1.108 / 12.0,
        strength_rated: 31500.0,
        temperature_components: 70.0,
        weight_unit: 1.094,
        ..Default::default()
    };

    // Save: always the latest schema version, human-friendly units
    let node = CableXmlHandler::create_node(&cable, UnitSystem::Imperial);
    let xml = node.to_xml_string()?;
    println!("{xml}\n");

    // Load: version-dispatched parse, converted back to consistent units
    let reparsed_node = XmlNode::from_xml_str(&xml)?;
    let mut loaded = Cable::default();
    let ok = CableXmlHandler::parse_node(&reparsed_node, Some(UnitSystem::Imperial), &mut loaded);
    println!(
        "reload ok={ok}: diameter {:.4} ft, weight {:.3} lbs/ft",
        loaded.diameter, loaded.weight_unit
    );

    // Old files keep working: a version 1 document
    let v1 = r#"<cable version="1" units="Imperial">
  <name>336 ACSR</name>
  <diameter units="in">0.741</diameter>
  <weight_unit units="lbs/ft">0.527</weight_unit>
</cable>"#;
    let mut old = Cable::default();
    let ok = CableXmlHandler::parse_node(
        &XmlNode::from_xml_str(v1)?,
        Some(UnitSystem::Imperial),
        &mut old,
    );
    println!("v1 reload ok={ok}: {} diameter {:.4} ft", old.name, old.diameter);

    // Unknown future versions are refused, not misread
    let future = "<cable version=\"99\" units=\"Imperial\"/>";
    let mut ignored = Cable::default();
    let ok = CableXmlHandler::parse_node(
        &XmlNode::from_xml_str(future)?,
        Some(UnitSystem::Imperial),
        &mut ignored,
    );
    println!("v99 reload ok={ok}");

    Ok(())
}
