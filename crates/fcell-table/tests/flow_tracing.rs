#![forbid(unsafe_code)]

use std::sync::{Arc, Mutex};

use fcell_table::{TableColumn, TableFlow, TableView};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Default)]
struct LayoutTraceState {
    layout_spans: usize,
    has_offset_field: bool,
    has_rebound_field: bool,
    rebound_recorded: Vec<u64>,
}

struct LayoutTraceCapture {
    state: Arc<Mutex<LayoutTraceState>>,
}

impl<S> Layer<S> for LayoutTraceCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        if attrs.metadata().name() != "fcell.flow.layout" {
            return;
        }
        let fields = attrs.metadata().fields();
        let mut state = self.state.lock().expect("layout trace state lock");
        state.layout_spans += 1;
        state.has_offset_field |= fields.field("offset").is_some();
        state.has_rebound_field |= fields.field("rebound").is_some();
    }

    fn on_record(&self, id: &tracing::Id, values: &tracing::span::Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if span.metadata().name() != "fcell.flow.layout" {
            return;
        }
        struct ReboundVisitor {
            rebound: Option<u64>,
        }
        impl tracing::field::Visit for ReboundVisitor {
            fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
                if field.name() == "rebound" {
                    self.rebound = Some(value);
                }
            }

            fn record_debug(&mut self, _field: &tracing::field::Field, _value: &dyn std::fmt::Debug) {}
        }
        let mut visitor = ReboundVisitor { rebound: None };
        values.record(&mut visitor);
        if let Some(rebound) = visitor.rebound {
            self.state
                .lock()
                .expect("layout trace state lock")
                .rebound_recorded
                .push(rebound);
        }
    }
}

#[test]
fn layout_span_reports_rebound_cells() {
    let state = Arc::new(Mutex::new(LayoutTraceState::default()));
    let subscriber = tracing_subscriber::registry().with(LayoutTraceCapture {
        state: Arc::clone(&state),
    });

    tracing::subscriber::with_default(subscriber, || {
        let view = TableView::new((0..10_u32).collect());
        let column = TableColumn::<u32, u32>::new("n").with_value_factory(|f| Some(*f.value));
        let mut flow = TableFlow::new(view, [column.clone(), column], 3);
        flow.scroll_to(5);
    });

    let state = state.lock().expect("layout trace state lock");
    assert_eq!(state.layout_spans, 2);
    assert!(state.has_offset_field);
    assert!(state.has_rebound_field);
    assert_eq!(state.rebound_recorded, vec![6, 6]);
}
