//! Delete rules: cascade, set-null, and restrict.

use maturalink_core::{
    ArgumentLinkRepository, ArgumentRepository, Database, Error, LinkRepository,
    MacroargumentRepository, NewArgument, NewArgumentLink, NewLink, NewMacroargument, NewSubject,
    SubjectRef, SubjectRepository,
};

struct Fixture {
    db: Database,
    subject_id: i64,
    a: i64,
    b: i64,
    macro_id: i64,
}

fn fixture() -> Fixture {
    let db = Database::open_in_memory().unwrap();
    let (subject_id, a, b, macro_id) = db
        .with_transaction(|tx| {
            let subject = SubjectRepository::new(tx).create(&NewSubject::new("Storia"))?;
            let args = ArgumentRepository::new(tx);
            let a = args.create(&NewArgument::new("A", SubjectRef::Id(subject.id)))?;
            let b = args.create(&NewArgument::new("B", SubjectRef::Id(subject.id)))?;
            let m = MacroargumentRepository::new(tx).create(&NewMacroargument::new("Potere"))?;

            let links = LinkRepository::new(tx);
            links.create(&NewLink::new("a-potere", a.id, m.id))?;
            links.create(&NewLink::new("b-potere", b.id, m.id))?;

            let arg_links = ArgumentLinkRepository::new(tx);
            arg_links.create(&NewArgumentLink::new("a->b", a.id, b.id))?;
            arg_links.create(&NewArgumentLink::new("b->a", b.id, a.id))?;
            Ok((subject.id, a.id, b.id, m.id))
        })
        .unwrap();
    Fixture {
        db,
        subject_id,
        a,
        b,
        macro_id,
    }
}

#[test]
fn test_delete_argument_cascades_links_and_argument_links() {
    let f = fixture();
    let outcome = f
        .db
        .with_transaction(|tx| ArgumentRepository::new(tx).delete(f.a))
        .unwrap();
    assert_eq!(outcome.cascaded, 3);
    assert_eq!(outcome.detached, 0);

    let stats = f.db.stats().unwrap();
    assert_eq!(stats.arguments, 1);
    assert_eq!(stats.links, 1);
    assert_eq!(stats.argument_links, 0);

    f.db.with_conn(|conn| {
        let remaining = ArgumentRepository::new(conn).require_detail(f.b)?;
        assert_eq!(remaining.links.len(), 1);
        assert!(remaining.from_argument_links.is_empty());
        assert!(remaining.to_argument_links.is_empty());
        Ok(())
    })
    .unwrap();
}

#[test]
fn test_delete_macroargument_nulls_links() {
    let f = fixture();
    let outcome = f
        .db
        .with_transaction(|tx| MacroargumentRepository::new(tx).delete(f.macro_id))
        .unwrap();
    assert_eq!(outcome.detached, 2);

    f.db.with_conn(|conn| {
        let links = LinkRepository::new(conn).list()?;
        assert_eq!(links.len(), 2);
        assert!(links
            .iter()
            .all(|l| l.link.macroargument_id.is_none() && l.macroargument.is_none()));
        assert!(MacroargumentRepository::new(conn).get(f.macro_id)?.is_none());
        Ok(())
    })
    .unwrap();
}

#[test]
fn test_delete_subject_with_arguments_is_restricted() {
    let f = fixture();
    let err = f
        .db
        .with_transaction(|tx| SubjectRepository::new(tx).delete(f.subject_id))
        .unwrap_err();
    assert!(matches!(err, Error::Constraint(_)), "got {err:?}");
    assert_eq!(f.db.stats().unwrap().subjects, 1);
}

#[test]
fn test_delete_missing_records_is_not_found() {
    let f = fixture();
    f.db.with_transaction(|tx| {
        assert!(ArgumentRepository::new(tx).delete(404).unwrap_err().is_not_found());
        assert!(MacroargumentRepository::new(tx).delete(404).unwrap_err().is_not_found());
        assert!(SubjectRepository::new(tx).delete(404).unwrap_err().is_not_found());
        Ok(())
    })
    .unwrap();
}

#[test]
fn test_list_details_matches_single_detail() {
    let f = fixture();
    f.db.with_conn(|conn| {
        let repo = ArgumentRepository::new(conn);
        let all = repo.list_details()?;
        assert_eq!(all.len(), 2);
        for detail in &all {
            assert_eq!(detail, &repo.require_detail(detail.id())?);
        }
        let a = all.iter().find(|d| d.id() == f.a).unwrap();
        assert_eq!(a.from_argument_links.len(), 1);
        assert_eq!(a.to_argument_links.len(), 1);
        Ok(())
    })
    .unwrap();
}
