//! Typed models against a mocked API.

use lpapi::{
    BugStatus, BugStub, Entity, Fields, Get, Importance, LpError, Member, Person, Root,
    SessionConfig, Update,
};
use serde_json::{json, Value as Json};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn root_for(mock_server: &MockServer) -> Root {
    lpapi::anonymous(&SessionConfig::new(mock_server.uri())).unwrap()
}

fn ok_json(body: Json) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn test_root_me() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people/+me"))
        .respond_with(ok_json(json!({"display_name": "Joe"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let me = root_for(&mock_server).me().await.unwrap();
    assert_eq!(me.display_name(), "Joe");
}

#[tokio::test]
async fn test_root_person_and_team() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/~joe"))
        .respond_with(ok_json(json!({
            "name": "joe",
            "display_name": "Joe",
            "is_team": false,
            "web_link": "https://launchpad.net/~joe",
            "date_created": "2011-03-05T12:34:56.123456+00:00"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/~ensemble"))
        .respond_with(ok_json(json!({"name": "ensemble", "display_name": "Ensemble", "is_team": true})))
        .mount(&mock_server)
        .await;

    let root = root_for(&mock_server);

    let joe = root.person("joe").await.unwrap();
    assert_eq!(joe.name(), "joe");
    assert_eq!(joe.web_page(), "https://launchpad.net/~joe");
    assert_eq!(
        joe.date_created().unwrap().to_rfc3339(),
        "2011-03-05T12:34:56.123456+00:00"
    );

    let team = root.team("ensemble").await.unwrap();
    assert_eq!(team.display_name(), "Ensemble");

    let err = root.person("ensemble").await.unwrap_err();
    assert!(matches!(err, LpError::UnexpectedKind { .. }));
    assert_eq!(err.to_string(), "ensemble is a team, not a person");

    let err = root.team("joe").await.unwrap_err();
    assert_eq!(err.to_string(), "joe is not a team");

    assert!(root.member("ensemble").await.unwrap().is_team());
    let member = root.member("joe").await.unwrap();
    assert_eq!(member.as_person().unwrap().display_name(), "Joe");
}

#[tokio::test]
async fn test_find_members_mixes_kinds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people"))
        .and(query_param("ws.op", "find"))
        .and(query_param("text", "someone"))
        .respond_with(ok_json(json!({
            "total_size": 2,
            "start": 0,
            "entries": [
                {"self_link": "http://self0", "display_name": "Name0", "is_team": false},
                {"self_link": "http://self1", "display_name": "Name1", "is_team": true}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let list = root_for(&mock_server).find_members("someone").await.unwrap();
    assert_eq!(list.total_size(), 2);

    let mut kinds = Vec::new();
    list.for_each(|member| {
        let kind = match &member {
            Member::Person(p) => format!("person:{}", p.display_name()),
            Member::Team(t) => format!("team:{}", t.display_name()),
        };
        kinds.push((kind, member.abs_loc().to_string()));
        Ok::<_, LpError>(())
    })
    .await
    .unwrap();

    assert_eq!(
        kinds,
        vec![
            ("person:Name0".to_string(), "http://self0".to_string()),
            ("team:Name1".to_string(), "http://self1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_find_people_and_teams() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/people"))
        .and(query_param("ws.op", "findPerson"))
        .respond_with(ok_json(json!({"entries": [{"display_name": "Ann"}]})))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/people"))
        .and(query_param("ws.op", "findTeam"))
        .respond_with(ok_json(json!({"entries": [{"name": "t1"}, {"name": "t2"}]})))
        .mount(&mock_server)
        .await;

    let root = root_for(&mock_server);

    let people = root.find_people("ann").await.unwrap().all().await.unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].display_name(), "Ann");

    let teams = root.find_teams("t").await.unwrap().all().await.unwrap();
    let names: Vec<_> = teams.iter().map(|t| t.name().to_string()).collect();
    assert_eq!(names, ["t1", "t2"]);
}

#[tokio::test]
async fn test_person_irc_nicks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/~lpad-test/irc_nicknames"))
        .respond_with(ok_json(json!({
            "total_size": 2,
            "start": 0,
            "entries": [{
                "self_link": "https://api.launchpad.net/1.0/~lpad-test/+ircnick/28983",
                "network": "irc.canonical.com",
                "nickname": "canonical-nick"
            }, {
                "self_link": "https://api.launchpad.net/1.0/~lpad-test/+ircnick/28982",
                "network": "irc.freenode.net",
                "nickname": "freenode-nick"
            }]
        })))
        .mount(&mock_server)
        .await;

    let mut fields = Fields::new();
    fields.insert(
        "irc_nicknames_collection_link".to_string(),
        json!(format!("{}/~lpad-test/irc_nicknames", mock_server.uri())),
    );
    let root = root_for(&mock_server);
    let person: Person = Person::from_value(lpapi::Value::new(
        root.value().session().clone(),
        mock_server.uri(),
        "",
        fields,
    ));

    let nicks = person.irc_nicks().await.unwrap();
    assert_eq!(nicks.len(), 2);
    assert_eq!(nicks[0].nick(), "canonical-nick");
    assert_eq!(nicks[1].network(), "irc.freenode.net");

    let person = Person::from_value(root.value().location("/~nobody"));
    let err = person.irc_nicks().await.unwrap_err();
    assert!(matches!(err, LpError::MissingLink(_)));
}

#[tokio::test]
async fn test_person_update() {
    let mock_server = MockServer::start().await;
    let self_link = format!("{}/~joe", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/~joe"))
        .respond_with(ok_json(json!({"self_link": &self_link, "display_name": "Joe", "is_team": false})))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/~joe"))
        .respond_with(
            ResponseTemplate::new(209)
                .set_body_json(json!({"self_link": &self_link, "display_name": "Joe Doe", "is_team": false})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut joe = Person::get(&root_for(&mock_server), "joe".to_string()).await.unwrap();
    assert!(!joe.is_dirty());

    joe.set_display_name("Joe Doe");
    assert!(joe.is_dirty());
    assert_eq!(joe.display_name(), "Joe Doe");

    joe.update().await.unwrap();
    assert!(!joe.is_dirty());
    assert_eq!(joe.display_name(), "Joe Doe");

    let requests = mock_server.received_requests().await.unwrap();
    let patch: Json = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(patch, json!({"display_name": "Joe Doe"}));
}

#[tokio::test]
async fn test_project() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lpad"))
        .respond_with(ok_json(json!({
            "name": "lpad",
            "display_name": "lpad",
            "title": "Launchpad bindings",
            "summary": "Bindings for the API.",
            "description": "Longer text."
        })))
        .mount(&mock_server)
        .await;

    let mut project = root_for(&mock_server).project("lpad").await.unwrap();
    assert_eq!(project.name(), "lpad");
    assert_eq!(project.title(), "Launchpad bindings");
    assert_eq!(project.summary(), "Bindings for the API.");
    assert_eq!(project.description(), "Longer text.");

    project.set_summary("New summary.");
    project.set_title("New title");
    assert_eq!(project.summary(), "New summary.");
    assert_eq!(
        Json::Object(project.value().pending_changes().clone()),
        json!({"summary": "New summary.", "title": "New title"})
    );
}

#[tokio::test]
async fn test_bug_and_tasks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bugs/123"))
        .respond_with(ok_json(json!({
            "id": 123,
            "title": "Crash",
            "description": "It crashes.",
            "tags": "crash startup",
            "private": true,
            "security_related": false,
            "bug_tasks_collection_link": format!("{}/bugs/123/bug_tasks", mock_server.uri())
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bugs/123/bug_tasks"))
        .respond_with(ok_json(json!({
            "total_size": 1,
            "start": 0,
            "entries": [{
                "status": "In Progress",
                "importance": "High",
                "assignee_link": format!("{}/~joe", mock_server.uri())
            }]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/~joe"))
        .respond_with(ok_json(json!({"display_name": "Joe"})))
        .mount(&mock_server)
        .await;

    let mut bug = root_for(&mock_server).bug(123).await.unwrap();
    assert_eq!(bug.id(), 123);
    assert_eq!(bug.title(), "Crash");
    assert_eq!(bug.tags(), ["crash", "startup"]);
    assert!(bug.private());
    assert!(!bug.security_related());
    assert!(bug.date_created().is_none());

    bug.set_tags(&["a", "b"]);
    bug.set_private(false);
    assert_eq!(bug.tags(), ["a", "b"]);
    assert!(!bug.private());

    let mut tasks = bug.tasks().await.unwrap().all().await.unwrap();
    assert_eq!(tasks.len(), 1);
    let task = &mut tasks[0];
    assert_eq!(task.status(), BugStatus::InProgress);
    assert_eq!(task.importance(), Importance::High);

    let assignee = task.assignee().await.unwrap().unwrap();
    assert_eq!(assignee.display_name(), "Joe");

    task.set_status(BugStatus::FixCommitted);
    task.set_importance(Importance::Wishlist);
    assert_eq!(task.status(), BugStatus::FixCommitted);
    assert_eq!(task.value().string_field("importance"), "Wishlist");
    assert_eq!(BugStatus::from_api("Something new"), BugStatus::Unknown);
}

#[tokio::test]
async fn test_create_bug() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bugs"))
        .and(body_string_contains("ws.op=createBug"))
        .and(body_string_contains("title=Broken+build"))
        .and(body_string_contains("tags=ci+build"))
        .and(body_string_contains("private=true"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", format!("{}/bugs/42", mock_server.uri()).as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bugs/42"))
        .respond_with(ok_json(json!({"id": 42, "title": "Broken build"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let stub = BugStub {
        title: "Broken build".to_string(),
        description: "CI fails.".to_string(),
        target: format!("{}/lpad", mock_server.uri()),
        private: true,
        tags: vec!["ci".to_string(), "build".to_string()],
        ..Default::default()
    };
    let bug = root_for(&mock_server).create_bug(&stub).await.unwrap();
    assert_eq!(bug.id(), 42);
    assert_eq!(bug.value().loc(), format!("{}/bugs/42", mock_server.uri()));

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(!body.contains("security_related"));
}
