//! Student handlers: list, read, create, rename, soft-delete.

use crate::error::AppError;
use crate::service::StudentContext;
use crate::student::{AddStudentRequest, Student, StudentDto, UpdateStudentRequest};
use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};
use uuid::Uuid;

pub const STUDENT_NOT_FOUND: &str = "Estudante não encontrado!";
pub const NO_RECORD_FOUND: &str = "Nenhum registro encontrado!";
pub const STUDENT_EXISTS: &str = "Estudante já existe!";
pub const STUDENT_DELETED: &str = "Estudante deletado com sucesso!";

/// Non-UUID ids are reported the same way as unknown ids.
fn parse_id(id_str: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::NotFound(not_found.into()))
}

pub async fn list(ctx: StudentContext) -> Result<impl IntoResponse, AppError> {
    let students = ctx.query_active().await?;
    let data: Vec<StudentDto> = students.iter().map(StudentDto::from).collect();
    Ok((StatusCode::OK, Json(data)))
}

pub async fn read(
    Path(id_str): Path<String>,
    ctx: StudentContext,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, STUDENT_NOT_FOUND)?;
    let student = ctx
        .find_active_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.into()))?;
    Ok((StatusCode::OK, Json(StudentDto::from(&student))))
}

pub async fn create(
    mut ctx: StudentContext,
    Json(body): Json<AddStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if ctx.exists_by_name(&body.name).await? {
        return Err(AppError::Conflict(STUDENT_EXISTS.into()));
    }
    let student = Student::new(body.name);
    ctx.add(&student);
    ctx.save().await?;
    tracing::info!(id = %student.id(), "student created");
    Ok((StatusCode::OK, Json(StudentDto::from(&student))))
}

/// Rename. Looks up inactive students too and does not re-check name uniqueness.
pub async fn update(
    Path(id_str): Path<String>,
    mut ctx: StudentContext,
    Json(body): Json<UpdateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, NO_RECORD_FOUND)?;
    let mut student = ctx
        .find_any_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NO_RECORD_FOUND.into()))?;
    student.rename(body.name);
    ctx.update(&student);
    ctx.save().await?;
    Ok((StatusCode::OK, Json(StudentDto::from(&student))))
}

/// Soft delete: clears `active`, the row stays.
pub async fn delete(
    Path(id_str): Path<String>,
    mut ctx: StudentContext,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str, STUDENT_NOT_FOUND)?;
    let mut student = ctx
        .find_active_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(STUDENT_NOT_FOUND.into()))?;
    student.deactivate();
    ctx.update(&student);
    ctx.save().await?;
    tracing::info!(id = %student.id(), "student deactivated");
    Ok((StatusCode::OK, Json(STUDENT_DELETED)))
}
