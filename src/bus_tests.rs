//! Unit tests for the EventBus - dashboard event fan-out.

#[cfg(test)]
mod bus_tests {
    use crate::bus::EventBus;
    use crate::category::Category;
    use crate::events::{Event, PanelPhase, PanelTransition};

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(Event::CategorySelected { category: Category::Data }), 0);
    }

    #[tokio::test]
    async fn test_multiple_subscribers_receive() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let delivered = bus.publish(Event::StockSelected {
            stock_id: 5,
            ticker: "TSLA".to_string(),
        });
        assert_eq!(delivered, 2);

        for rx in [&mut rx1, &mut rx2] {
            match rx.recv().await {
                Ok(Event::StockSelected { stock_id, ticker }) => {
                    assert_eq!(stock_id, 5);
                    assert_eq!(ticker, "TSLA");
                }
                other => panic!("Expected StockSelected, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_panel_event_serializes_with_type_tag() {
        let event = Event::Panel(PanelTransition {
            category: Category::Reddit,
            stock_id: 1,
            phase: PanelPhase::Discarded,
            generation: 3,
            from_cache: false,
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "panel");
        assert_eq!(value["category"], "Reddit");
        assert_eq!(value["phase"], "discarded");
    }
}
