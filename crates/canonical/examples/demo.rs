use canonical::{AnchorSet, Canonicalizer, CanonicalizeConfig};

fn main() {
    let names: Vec<String> = std::env::args().skip(1).collect();
    let names = if names.is_empty() {
        vec!["Shadow".to_string(), "SHAD0W".into(), "B0lt".into(), "80LT".into()]
    } else {
        names
    };

    let canonicalizer = Canonicalizer::new(CanonicalizeConfig {
        normalize_unicode: true,
        ..Default::default()
    })
    .unwrap_or_default();

    for name in &names {
        let key = canonicalizer.normalize(name);
        let anchors = AnchorSet::from_key(&key, canonicalizer.fold());
        println!("{name:>16} -> {key:<16} anchors: {}", anchors.len());
    }
}
