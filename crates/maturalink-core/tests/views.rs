//! Views built from persisted data.

use maturalink_core::{
    build_graph, group_arguments, seed_subjects, ArgumentRepository, Database, GroupMode,
    LinkRepository, MacroargumentRepository, NewArgument, NewLink, NewMacroargument, SubjectRef,
    SubjectRepository, NO_MACROARGUMENT,
};

fn seeded() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.with_transaction(|tx| {
        seed_subjects(tx)?;
        let args = ArgumentRepository::new(tx);
        let dante = args.create(&NewArgument::new("Dante", SubjectRef::Name("Italiano".into())))?;
        args.create(&NewArgument::new("Kant", SubjectRef::Name("Filosofia".into())))?;
        let viaggio = MacroargumentRepository::new(tx).create(&NewMacroargument::new("Viaggio"))?;
        LinkRepository::new(tx).create(&NewLink::new("oltretomba", dante.id, viaggio.id))?;
        Ok(())
    })
    .unwrap();
    db
}

#[test]
fn test_grouped_view_from_database() {
    let db = seeded();
    let details = db
        .with_conn(|conn| ArgumentRepository::new(conn).list_details())
        .unwrap();

    let view = group_arguments(&details, GroupMode::MacroSubject);
    let keys: Vec<_> = view.groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec![NO_MACROARGUMENT, "Viaggio"]);
    assert_eq!(view.groups[1].groups[0].key, "Italiano");
    assert_eq!(view.groups[1].groups[0].arguments[0].links[0].description, "oltretomba");
}

#[test]
fn test_graph_from_database() {
    let db = seeded();
    let (subjects, details) = db
        .with_conn(|conn| {
            Ok((
                SubjectRepository::new(conn).list()?,
                ArgumentRepository::new(conn).list_details()?,
            ))
        })
        .unwrap();

    let graph = build_graph(&subjects, &details);
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.legend.len(), subjects.len());
    assert_eq!(graph.legend[0].name, "Arte");
}
