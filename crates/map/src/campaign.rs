//! Time and location gating of the campaign content on the page.

use geo::Point;
use liner_core::geofence::Geofence;
use liner_core::hours::{OperatingHours, current_hour};

/// Page elements the gate toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    CampaignSections,
    MessageSection,
    AreaMessage,
    TimeMessage,
}

impl Element {
    pub const ALL: [Element; 4] = [
        Element::CampaignSections,
        Element::MessageSection,
        Element::AreaMessage,
        Element::TimeMessage,
    ];

    /// DOM id of the element on the demo page.
    pub fn dom_id(self) -> &'static str {
        match self {
            Element::CampaignSections => "campaign-sections",
            Element::MessageSection => "message-section",
            Element::AreaMessage => "area-message",
            Element::TimeMessage => "time-message",
        }
    }
}

pub trait VisibilitySink {
    fn set_visible(&mut self, element: Element, visible: bool);
}

/// Result of one gate evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CampaignVisibility {
    pub campaign_sections: bool,
    pub message_section: bool,
    pub area_message: bool,
    pub time_message: bool,
}

impl CampaignVisibility {
    pub fn is_visible(&self, element: Element) -> bool {
        match element {
            Element::CampaignSections => self.campaign_sections,
            Element::MessageSection => self.message_section,
            Element::AreaMessage => self.area_message,
            Element::TimeMessage => self.time_message,
        }
    }

    pub fn apply(&self, sink: &mut dyn VisibilitySink) {
        for element in Element::ALL {
            sink.set_visible(element, self.is_visible(element));
        }
    }
}

/// Shows the campaign only inside the fence during operating hours;
/// otherwise shows a message explaining which condition failed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignGate {
    geofence: Geofence,
    hours: OperatingHours,
}

impl CampaignGate {
    pub fn new(geofence: Geofence, hours: OperatingHours) -> Self {
        Self { geofence, hours }
    }

    pub fn evaluate(&self, location: Point, hour: u32) -> CampaignVisibility {
        let inside = self.geofence.contains(location);
        let open = self.hours.contains(hour);

        tracing::info!(
            longitude = location.x(),
            latitude = location.y(),
            hour,
            inside,
            open,
            "evaluated campaign gate"
        );

        let blocked = !inside || !open;
        CampaignVisibility {
            campaign_sections: !blocked,
            message_section: blocked,
            area_message: !inside,
            time_message: !open,
        }
    }

    /// [`evaluate`](Self::evaluate) at the current local hour.
    pub fn evaluate_now(&self, location: Point) -> CampaignVisibility {
        self.evaluate(location, current_hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SHINJUKU: Point = Point(geo::Coord { x: 139.70, y: 35.70 });
    const OSAKA: Point = Point(geo::Coord { x: 135.50, y: 34.69 });

    #[derive(Default)]
    struct Page(HashMap<&'static str, bool>);

    impl VisibilitySink for Page {
        fn set_visible(&mut self, element: Element, visible: bool) {
            self.0.insert(element.dom_id(), visible);
        }
    }

    #[test]
    fn test_inside_and_open_shows_campaign() {
        let gate = CampaignGate::default();
        let visibility = gate.evaluate(SHINJUKU, 12);

        assert_eq!(
            visibility,
            CampaignVisibility {
                campaign_sections: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_outside_fence() {
        let visibility = CampaignGate::default().evaluate(OSAKA, 12);

        assert!(!visibility.campaign_sections);
        assert!(visibility.message_section);
        assert!(visibility.area_message);
        assert!(!visibility.time_message);
    }

    #[test]
    fn test_outside_hours() {
        let gate = CampaignGate::default();

        for hour in [0, 9, 20, 23] {
            let visibility = gate.evaluate(SHINJUKU, hour);
            assert!(visibility.message_section, "hour {hour}");
            assert!(visibility.time_message, "hour {hour}");
            assert!(!visibility.area_message, "hour {hour}");
        }

        let both = gate.evaluate(OSAKA, 22);
        assert!(both.area_message && both.time_message);
    }

    #[test]
    fn test_apply_sets_every_element() {
        let mut page = Page::default();
        CampaignGate::default().evaluate(OSAKA, 8).apply(&mut page);

        assert_eq!(page.0.len(), 4);
        assert_eq!(page.0["campaign-sections"], false);
        assert_eq!(page.0["message-section"], true);
        assert_eq!(page.0["area-message"], true);
        assert_eq!(page.0["time-message"], true);
    }
}
