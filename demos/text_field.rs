//! A text field bound to an integer signal.
//!
//! The field stands in for a UI widget: it reports its (optional) text
//! through a producer whenever the text changes. A form subscribes to the
//! parsed integer and keeps its subscriptions in a `DisposeBag`.

use signalwire::{result::from_option, DisposeBag, Error, Producer, Signal};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// An observed text property.
struct TextField {
    text: signalwire::Atomic<Option<String>>,
    on_change: Producer<String>,
}

impl TextField {
    /// Create a field and the signal reporting its text.
    ///
    /// The field registers itself on the signal, so it lives as long as
    /// anyone listens to its text.
    fn bind() -> (Arc<Self>, Signal<String>) {
        let (on_change, signal) = Signal::pipe_labeled("text_field");
        let field = Arc::new(Self {
            text: signalwire::Atomic::new(None),
            on_change,
        });
        signal.keep_alive(field.clone());
        (field, signal)
    }

    fn text(&self) -> Option<String> {
        self.text.get()
    }

    fn set_text(&self, text: Option<&str>) {
        let text = text.map(str::to_string);
        self.text.mutate(|current| *current = text.clone());
        if !self.on_change.send(from_option(text, Error::Absent)) {
            tracing::debug!("text field has no listeners");
        }
    }
}

struct Form {
    disposables: DisposeBag,
}

impl Form {
    fn new(text: &Signal<String>) -> Self {
        let disposables = DisposeBag::new();
        let quantity = text.try_map(|s| {
            s.trim()
                .parse::<u32>()
                .map_err(|reason| Error::conversion(s.as_str(), reason))
        });
        disposables.insert(quantity.subscribe(|value| match value {
            Ok(n) => println!("   quantity = {n}"),
            Err(error) => println!("   invalid quantity: {error}"),
        }));
        Self { disposables }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Text Field Example ===\n");

    let (field, text) = TextField::bind();
    let form = Form::new(&text);
    drop(text);

    for input in [Some("17"), Some("abc"), None, Some(" 42 ")] {
        println!("typing {input:?}");
        field.set_text(input);
    }

    println!("\nClosing the form");
    drop(form);
    field.set_text(Some("99"));

    println!("   field text is still {:?}", field.text());

    println!("\n✓ Example complete!");
}
