// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_review;
use crate::{ApiError, EntityGateway, GatewayConfig, HttpGateway};
use review_desk_domain::{
    Department, DepartmentId, Employee, GoalId, ReviewAssignment, ReviewDraft, ReviewId,
    ReviewKind, ReviewStatus, SubjectRef, Task, TaskId, Team, TeamId,
};
use serde_json::json;
use time::macros::date;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_gateway(server: &MockServer) -> HttpGateway {
    HttpGateway::new(GatewayConfig {
        base_url: format!("{}/api", server.uri()),
        token: Some(String::from("secret")),
        timeout_secs: 5,
    })
    .unwrap()
}

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/departments"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Engineering"},
            {"id": 2, "name": "Sales"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let departments: Vec<Department> = create_test_gateway(&server)
        .list_departments()
        .await
        .unwrap();

    assert_eq!(departments.len(), 2);
    assert_eq!(departments[1].name, "Sales");
}

#[tokio::test]
async fn test_teams_are_scoped_by_department_query() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams"))
        .and(query_param("departmentId", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 10, "name": "Platform", "departmentId": 1}
        ])))
        .mount(&server)
        .await;

    let teams: Vec<Team> = create_test_gateway(&server)
        .list_teams(DepartmentId::new(1))
        .await
        .unwrap();

    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].department_id, DepartmentId::new(1));
}

#[tokio::test]
async fn test_single_team_lookup() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/teams/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            {"id": 10, "name": "Platform", "departmentId": 1}
        )))
        .expect(1)
        .mount(&server)
        .await;

    let team: Team = create_test_gateway(&server)
        .get_team(TeamId::new(10))
        .await
        .unwrap();

    assert_eq!(team.id, TeamId::new(10));
    assert_eq!(team.department_id, DepartmentId::new(1));
}

#[tokio::test]
async fn test_task_detail_and_missing_assignee() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 100,
            "title": "Migrate billing",
            "goalId": 1,
            "dueDate": "2025-06-01T00:00:00.000Z",
            "status": "in-progress"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/task/100/employee"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;
    let gateway: HttpGateway = create_test_gateway(&server);

    let task: Task = gateway.get_task(TaskId::new(100)).await.unwrap();
    let employee: Option<Employee> = gateway.get_task_employee(TaskId::new(100)).await.unwrap();

    assert_eq!(task.goal_id, Some(GoalId::new(1)));
    assert_eq!(task.due_date, Some(date!(2025 - 06 - 01)));
    assert_eq!(employee, None);
}

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/departments"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/goals/team/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/goalReviews"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;
    let gateway: HttpGateway = create_test_gateway(&server);

    match gateway.list_departments().await {
        Err(ApiError::Authentication { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "token expired");
        }
        other => panic!("expected an authentication error, got {other:?}"),
    }
    assert!(matches!(
        gateway.list_goals(TeamId::new(99)).await,
        Err(ApiError::NotFound(_))
    ));
    match gateway.list_reviews(ReviewKind::Goal).await {
        Err(ApiError::Server { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("expected a server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "nope"})))
        .mount(&server)
        .await;

    let result: Result<Vec<Department>, ApiError> =
        create_test_gateway(&server).list_departments().await;

    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn test_create_posts_camel_case_draft() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/goalReviews"))
        .and(body_partial_json(json!({
            "goalId": 2,
            "teamId": 10,
            "dueDate": "2025-07-01",
            "status": "Pending"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 77,
            "goalId": 2,
            "teamId": 10,
            "departmentId": 1,
            "dueDate": "2025-07-01",
            "description": "Check delivery against the plan",
            "status": "Pending"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let record: ReviewAssignment =
        create_test_review(0, SubjectRef::Goal(GoalId::new(2)), ReviewStatus::Pending);

    let stored: ReviewAssignment = create_test_gateway(&server)
        .create_review(ReviewKind::Goal, &ReviewDraft::from(&record))
        .await
        .unwrap();

    assert_eq!(stored.id, ReviewId::new(77));
    assert_eq!(stored.subject, SubjectRef::Goal(GoalId::new(2)));
}

#[tokio::test]
async fn test_update_and_delete_address_review_by_id() {
    let server: MockServer = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/taskReviews/60"))
        .and(body_partial_json(json!({"taskId": 100, "status": "In Progress"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 60,
            "taskId": 100,
            "teamId": 10,
            "employeeId": 7,
            "dueDate": "2025-07-01",
            "description": "Check delivery against the plan",
            "status": "In Progress"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/taskReviews/60"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let gateway: HttpGateway = create_test_gateway(&server);
    let record: ReviewAssignment =
        create_test_review(60, SubjectRef::Task(TaskId::new(100)), ReviewStatus::InProgress);

    let stored: ReviewAssignment = gateway
        .update_review(ReviewKind::Task, ReviewId::new(60), &ReviewDraft::from(&record))
        .await
        .unwrap();
    gateway
        .delete_review(ReviewKind::Task, ReviewId::new(60))
        .await
        .unwrap();

    assert_eq!(stored.status, ReviewStatus::InProgress);
}

#[tokio::test]
async fn test_refused_connection_is_unreachable() {
    let gateway: HttpGateway = HttpGateway::new(GatewayConfig {
        base_url: String::from("http://127.0.0.1:1/api"),
        token: None,
        timeout_secs: 5,
    })
    .unwrap();

    let err: ApiError = gateway.list_departments().await.unwrap_err();

    assert!(err.is_unreachable());
    assert!(err.to_fetch_failure().unreachable);
}

#[test]
fn test_invalid_config_is_rejected_before_building_client() {
    let result: Result<HttpGateway, ApiError> = HttpGateway::new(GatewayConfig {
        base_url: String::from("hr.example.com"),
        ..GatewayConfig::default()
    });

    assert!(matches!(result, Err(ApiError::InvalidConfig { .. })));
}
