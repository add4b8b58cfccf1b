//! Lesson manager under one module: lessons with section trees, the
//! authored-quiz patch, and lesson/section mutations.

use std::collections::HashMap;

use futures::future::join_all;

use whitebox_core::course::Course;
use whitebox_core::forms::{
    lesson_payload, multipart_fields, quiz_lesson_payload, section_payload, with_parent_field,
    LessonDraft, SectionDraft,
};
use whitebox_core::lesson::{build_section_tree, LessonView};
use whitebox_core::module::Module;

use crate::endpoints::courses::LessonWithSections;
use crate::error::ApiError;
use crate::http::{ApiClient, FilePart};
use crate::pages::note_error;

/// State behind the lesson management surface.
#[derive(Debug, Default)]
pub struct LessonManagerPage {
    pub course: Option<Course>,
    pub module: Option<Module>,
    pub lessons: Vec<LessonView>,
    pub error: Option<String>,
}

impl LessonManagerPage {
    /// Load the page: course, module, and the lessons-with-sections
    /// list in parallel; then patch authored-quiz flags per quiz
    /// lesson without blocking the first render data.
    pub async fn load(client: &ApiClient, course_id: &str, module_id: &str) -> Self {
        let courses = client.courses();
        let (course, module, lessons) = tokio::join!(
            courses.get(course_id),
            courses.get_module(course_id, module_id),
            courses.list_lessons_with_sections(course_id, module_id),
        );

        let mut error = None;
        let course = note_error(&mut error, course);
        let module = note_error(&mut error, module);
        let mut lessons: Vec<LessonView> = note_error(&mut error, lessons)
            .unwrap_or_default()
            .into_iter()
            .map(assemble_lesson)
            .collect();

        let counts = fetch_question_counts(client, &lessons).await;
        patch_quiz_flags(&mut lessons, &counts);

        Self {
            course,
            module,
            lessons,
            error,
        }
    }

    /// Create or update a lesson, multipart with an optional file.
    /// `lesson_id` present means update. Quiz lessons get the forced
    /// content type and title suffix from the payload shaping.
    pub async fn save_lesson(
        &mut self,
        client: &ApiClient,
        course_id: &str,
        module_id: &str,
        lesson_id: Option<&str>,
        draft: &LessonDraft,
        is_quiz: bool,
        file: Option<FilePart>,
    ) -> Result<(), ApiError> {
        let payload = if is_quiz {
            quiz_lesson_payload(draft, module_id)
        } else {
            lesson_payload(draft, module_id)
        };
        let fields = with_parent_field(multipart_fields(&payload), "module", module_id);

        match lesson_id {
            Some(id) => {
                client
                    .courses()
                    .update_lesson(course_id, module_id, id, fields, file)
                    .await?;
            }
            None => {
                client
                    .courses()
                    .create_lesson(course_id, module_id, fields, file)
                    .await?;
            }
        }
        self.reload(client, course_id, module_id).await;
        Ok(())
    }

    /// Delete a lesson. The cascade (sections, quiz) happens server
    /// side; callers confirm with [`lesson_delete_warning`] first.
    pub async fn delete_lesson(
        &mut self,
        client: &ApiClient,
        course_id: &str,
        module_id: &str,
        lesson_id: &str,
    ) -> Result<(), ApiError> {
        client
            .courses()
            .delete_lesson(course_id, module_id, lesson_id)
            .await?;
        self.reload(client, course_id, module_id).await;
        Ok(())
    }

    /// Create or update a section under a lesson.
    pub async fn save_section(
        &mut self,
        client: &ApiClient,
        course_id: &str,
        module_id: &str,
        lesson_id: &str,
        section_id: Option<&str>,
        draft: &SectionDraft,
    ) -> Result<(), ApiError> {
        let payload = section_payload(draft, lesson_id);
        match section_id {
            Some(id) => {
                client
                    .courses()
                    .update_section(course_id, module_id, lesson_id, id, &payload)
                    .await?;
            }
            None => {
                client
                    .courses()
                    .create_section(course_id, module_id, lesson_id, &payload)
                    .await?;
            }
        }
        self.reload(client, course_id, module_id).await;
        Ok(())
    }

    pub async fn delete_section(
        &mut self,
        client: &ApiClient,
        course_id: &str,
        module_id: &str,
        lesson_id: &str,
        section_id: &str,
    ) -> Result<(), ApiError> {
        client
            .courses()
            .delete_section(course_id, module_id, lesson_id, section_id)
            .await?;
        self.reload(client, course_id, module_id).await;
        Ok(())
    }

    async fn reload(&mut self, client: &ApiClient, course_id: &str, module_id: &str) {
        let fresh = Self::load(client, course_id, module_id).await;
        self.lessons = fresh.lessons;
        if fresh.error.is_some() {
            self.error = fresh.error;
        }
    }
}

/// Confirmation text for a lesson delete, naming the cascade.
pub fn lesson_delete_warning(lesson_title: &str) -> String {
    format!(
        "Delete \"{lesson_title}\"? All sections and quiz will also be deleted."
    )
}

fn assemble_lesson(raw: LessonWithSections) -> LessonView {
    LessonView {
        has_quiz: raw.has_quiz,
        sections: build_section_tree(&raw.sections),
        lesson: raw.lesson,
    }
}

/// Question-count fan-out over quiz lessons only. A failed check
/// reads as zero questions.
async fn fetch_question_counts(
    client: &ApiClient,
    lessons: &[LessonView],
) -> HashMap<String, usize> {
    let checks = join_all(
        lessons
            .iter()
            .filter(|view| view.lesson.is_quiz())
            .map(|view| async move {
                let count = match client.assessments().list_questions(&view.lesson.id).await {
                    Ok(questions) => questions.len(),
                    Err(error) => {
                        tracing::warn!(lesson_id = %view.lesson.id, %error, "question count failed");
                        0
                    }
                };
                (view.lesson.id.clone(), count)
            }),
    )
    .await;
    checks.into_iter().collect()
}

/// Apply authored-quiz counts: a quiz lesson with zero questions loses
/// its `has_quiz` flag; lessons absent from the map keep theirs.
fn patch_quiz_flags(lessons: &mut [LessonView], counts: &HashMap<String, usize>) {
    for view in lessons {
        if let Some(count) = counts.get(&view.lesson.id) {
            view.has_quiz = *count > 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whitebox_core::lesson::{ContentType, Lesson, Section};

    fn lesson(id: &str, content_type: ContentType) -> Lesson {
        Lesson {
            id: id.into(),
            module: None,
            title: format!("Lesson {id}"),
            content_type,
            content: String::new(),
            description: None,
            duration_minutes: None,
            order: 1,
            is_required: true,
            created_at: None,
        }
    }

    fn section(id: &str, order: i64, parent: Option<&str>) -> Section {
        Section {
            id: id.into(),
            lesson: None,
            title: format!("Section {id}"),
            content_type: None,
            content: String::new(),
            order,
            is_subsection: parent.is_some(),
            parent_section: parent
                .map(|p| Box::new(whitebox_core::types::ObjectOrId::Id(p.to_string()))),
            created_at: None,
        }
    }

    #[test]
    fn assemble_builds_section_tree() {
        let raw = LessonWithSections {
            lesson: lesson("l1", ContentType::Text),
            sections: vec![
                section("s2", 2, None),
                section("s1", 1, None),
                section("s3", 1, Some("s1")),
            ],
            has_quiz: false,
        };
        let view = assemble_lesson(raw);
        assert_eq!(view.sections.len(), 2);
        assert_eq!(view.sections[0].section.id, "s1");
        assert_eq!(view.sections[0].subsections[0].id, "s3");
    }

    #[test]
    fn quiz_flag_patched_from_counts() {
        let mut lessons = vec![
            LessonView {
                lesson: lesson("l1", ContentType::Quiz),
                sections: Vec::new(),
                has_quiz: true,
            },
            LessonView {
                lesson: lesson("l2", ContentType::Quiz),
                sections: Vec::new(),
                has_quiz: true,
            },
            LessonView {
                lesson: lesson("l3", ContentType::Text),
                sections: Vec::new(),
                has_quiz: false,
            },
        ];
        let counts = HashMap::from([("l1".to_string(), 4), ("l2".to_string(), 0)]);
        patch_quiz_flags(&mut lessons, &counts);
        assert!(lessons[0].has_quiz);
        assert!(!lessons[1].has_quiz);
        assert!(!lessons[2].has_quiz);
    }

    #[test]
    fn delete_warning_names_the_cascade() {
        let warning = lesson_delete_warning("Intro");
        assert!(warning.contains("Intro"));
        assert!(warning.contains("All sections and quiz will also be deleted."));
    }
}
