//! Ordered, read-only lesson catalog.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{Lesson, LessonDraft, LessonError, LessonIcon, LessonId, Task};
use crate::time::Clock;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("unknown lesson: {0}")]
    UnknownLesson(String),

    #[error("lesson catalog is empty")]
    Empty,

    #[error("duplicate lesson id: {0}")]
    DuplicateLesson(LessonId),

    #[error("invalid lesson pack: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid lesson {id}: {source}")]
    Lesson {
        id: LessonId,
        #[source]
        source: LessonError,
    },
}

#[derive(Debug, Deserialize)]
struct LessonPack {
    lessons: Vec<LessonDraft>,
}

/// Lessons keyed by id, iterated in definition order.
#[derive(Debug, Clone)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
    index: HashMap<LessonId, usize>,
}

impl LessonCatalog {
    /// Build a catalog from lessons in display order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` if `lessons` is empty.
    /// Returns `CatalogError::DuplicateLesson` if two lessons share an id.
    pub fn from_lessons(lessons: Vec<Lesson>) -> Result<Self, CatalogError> {
        if lessons.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(lessons.len());
        for (pos, lesson) in lessons.iter().enumerate() {
            if index.insert(lesson.id().clone(), pos).is_some() {
                return Err(CatalogError::DuplicateLesson(lesson.id().clone()));
            }
        }

        Ok(Self { lessons, index })
    }

    /// Parse a JSON lesson pack of the form `{"lessons": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, `CatalogError::Lesson`
    /// for lessons that fail validation, and the `from_lessons` errors.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let pack: LessonPack = serde_json::from_str(raw)?;
        let lessons = pack
            .lessons
            .into_iter()
            .map(|draft| {
                let id = draft.id.clone();
                draft
                    .validate()
                    .map_err(|source| CatalogError::Lesson { id, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_lessons(lessons)
    }

    /// The five built-in missions.
    ///
    /// The `date` task output is rendered from `clock` once, at construction.
    #[must_use]
    pub fn builtin(clock: &Clock) -> Self {
        let lessons = builtin_lessons(clock);
        let index = lessons
            .iter()
            .enumerate()
            .map(|(pos, lesson)| (lesson.id().clone(), pos))
            .collect();
        Self { lessons, index }
    }

    /// # Errors
    ///
    /// Returns `CatalogError::UnknownLesson` if `id` is not in the catalog.
    pub fn get(&self, id: &str) -> Result<&Lesson, CatalogError> {
        self.position(id).map(|pos| &self.lessons[pos])
    }

    /// # Errors
    ///
    /// Returns `CatalogError::UnknownLesson` if `id` is not in the catalog.
    pub fn position(&self, id: &str) -> Result<usize, CatalogError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::UnknownLesson(id.to_string()))
    }

    /// # Errors
    ///
    /// Returns `CatalogError::UnknownLesson` if `id` is not in the catalog.
    pub fn task_count(&self, id: &str) -> Result<usize, CatalogError> {
        self.get(id).map(Lesson::task_count)
    }

    /// Lesson ids in definition order.
    pub fn lesson_ids(&self) -> impl Iterator<Item = &LessonId> {
        self.lessons.iter().map(Lesson::id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.iter()
    }

    #[must_use]
    pub fn first(&self) -> &Lesson {
        // Non-empty by construction.
        &self.lessons[0]
    }

    /// The lesson after `id` in definition order, if any.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownLesson` if `id` is not in the catalog.
    pub fn next_after(&self, id: &str) -> Result<Option<&Lesson>, CatalogError> {
        let pos = self.position(id)?;
        Ok(self.lessons.get(pos + 1))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

fn lesson_id(raw: &str) -> LessonId {
    LessonId::new(raw).unwrap_or_else(|err| panic!("built-in lesson id {raw:?}: {err}"))
}

#[allow(clippy::too_many_arguments)]
fn lesson(
    id: &str,
    title: &str,
    icon: LessonIcon,
    content: &str,
    hint: &str,
    tasks: Vec<Task>,
    commands: &[&str],
) -> Lesson {
    Lesson::new(
        lesson_id(id),
        title,
        icon,
        content,
        hint,
        tasks,
        commands.iter().map(|cmd| (*cmd).to_string()).collect(),
    )
    .unwrap_or_else(|err| panic!("built-in lesson {id:?}: {err}"))
}

fn builtin_lessons(clock: &Clock) -> Vec<Lesson> {
    vec![
        lesson(
            "intro",
            "Introduction to the Terminal",
            LessonIcon::Rocket,
            "Welcome to Terminal Quest! Today you'll learn about the command line, a powerful way to talk to your computer.

The terminal (or command line) is like a text-based control center for your computer. Instead of clicking on pictures (icons), you type commands to tell the computer what to do.

Why learn the terminal?
• It's powerful - you can do things that aren't possible with regular clicking
• It's faster once you learn it
• It's everywhere - from tiny computers to huge servers
• It makes you feel like a computer wizard!",
            "Type exactly: echo \"Hello World\" and press Enter. The echo command displays text on the screen.",
            vec![
                Task::new(
                    "echo \"Hello World\"",
                    "Hello World",
                    "The echo command displays text on the screen.",
                ),
                Task::new(
                    "date",
                    clock.local_timestamp(),
                    "The date command shows the current date and time.",
                ),
                Task::new("whoami", "user", "The whoami command shows your username."),
            ],
            &["echo", "date", "whoami"],
        ),
        lesson(
            "navigation",
            "Navigating the File System",
            LessonIcon::HardDrive,
            "In this lesson, you'll learn how to move around your computer's file system using the terminal.

Just like folders on your desktop, the terminal lets you navigate through directories (folders) to find your files.

Here are the essential navigation commands:
• pwd - Print Working Directory (shows where you are)
• ls - List (shows what files and folders are in your current location)
• cd - Change Directory (moves you to a different folder)",
            "Type exactly: pwd and press Enter. This will show you your current location in the file system.",
            vec![
                Task::new("pwd", "/home/user", "pwd shows your current directory (location)."),
                Task::new(
                    "ls",
                    "Documents  Downloads  Pictures  Music  Videos",
                    "ls lists all files and folders in your current directory.",
                ),
                Task::new(
                    "cd Documents",
                    "Changed to /home/user/Documents",
                    "cd changes your current directory to the one you specify.",
                ),
                Task::new(
                    "ls",
                    "homework.txt  project.pdf  notes.md",
                    "Now we see the contents of the Documents directory.",
                ),
                Task::new(
                    "cd ..",
                    "Changed to /home/user",
                    "cd .. moves you up one directory (to the parent folder).",
                ),
            ],
            &["pwd", "ls", "cd"],
        ),
        lesson(
            "files",
            "Working with Files",
            LessonIcon::FileText,
            "Now let's learn how to create, view, and manage files using the terminal.

These commands will help you work with files:
• touch - Creates a new, empty file
• cat - Shows the contents of a file
• cp - Copies a file
• mv - Moves or renames a file
• rm - Removes (deletes) a file",
            "Type exactly: touch myfile.txt and press Enter. This creates a new empty file called myfile.txt.",
            vec![
                Task::new(
                    "touch myfile.txt",
                    "File created: myfile.txt",
                    "touch creates a new empty file.",
                ),
                Task::new(
                    "echo \"Hello, this is my file\" > myfile.txt",
                    "Text written to myfile.txt",
                    "This adds text to our file. The > redirects the output of echo into the file.",
                ),
                Task::new(
                    "cat myfile.txt",
                    "Hello, this is my file",
                    "cat displays the contents of a file.",
                ),
                Task::new(
                    "cp myfile.txt myfilecopy.txt",
                    "File copied to myfilecopy.txt",
                    "cp makes a copy of a file.",
                ),
                Task::new(
                    "mv myfile.txt renamed.txt",
                    "File renamed to renamed.txt",
                    "mv can rename a file (or move it to a different location).",
                ),
            ],
            &["touch", "cat", "cp", "mv", "echo >"],
        ),
        lesson(
            "permissions",
            "File Permissions",
            LessonIcon::Lock,
            "In this lesson, you'll learn about file permissions - who's allowed to read, write, or execute files on your computer.

In Unix-like systems (like Linux and macOS), each file has three types of permissions:
• r - Read (can view the file)
• w - Write (can modify the file)
• x - Execute (can run the file as a program)

And these permissions apply to three groups:
• Owner (you)
• Group (other users in your group)
• Others (everyone else)",
            "Type exactly: ls -l and press Enter. The -l option shows the 'long format' with permission details.",
            vec![
                Task::new(
                    "ls -l",
                    "total 12\n-rw-r--r-- 1 user user 24 Apr 1 10:00 myfilecopy.txt\n-rw-r--r-- 1 user user 22 Apr 1 10:01 renamed.txt",
                    "ls -l shows detailed information including permissions. The \"rw-r--r--\" part shows the permissions.",
                ),
                Task::new(
                    "touch script.sh",
                    "File created: script.sh",
                    "We created a shell script file.",
                ),
                Task::new(
                    "echo \"echo Hello from script\" > script.sh",
                    "Text written to script.sh",
                    "We added a simple command to our script.",
                ),
                Task::new(
                    "chmod +x script.sh",
                    "Execution permission added to script.sh",
                    "chmod +x adds execution permission, allowing the file to be run as a program.",
                ),
                Task::new(
                    "ls -l script.sh",
                    "-rwxr-xr-x 1 user user 20 Apr 1 10:05 script.sh",
                    "Now the permissions include \"x\" (execute) for all users.",
                ),
            ],
            &["ls -l", "chmod"],
        ),
        lesson(
            "pipes",
            "Pipes and Redirects",
            LessonIcon::Command,
            "One of the most powerful features of the terminal is the ability to connect commands together using pipes and redirects.

These special operators help you:
• | (pipe) - Takes the output of one command and sends it to another command
• > (redirect) - Sends the output of a command to a file (overwrites the file)
• >> (append) - Adds the output of a command to the end of a file",
            "Type exactly: echo \"Line 1\" > multiline.txt and press Enter. This creates a file with one line of text.",
            vec![
                Task::new(
                    "echo \"Line 1\" > multiline.txt",
                    "Text written to multiline.txt",
                    "> redirects output to a file (creates or overwrites).",
                ),
                Task::new(
                    "echo \"Line 2\" >> multiline.txt",
                    "Text appended to multiline.txt",
                    ">> appends output to a file (adds to the end).",
                ),
                Task::new(
                    "echo \"Line 3\" >> multiline.txt",
                    "Text appended to multiline.txt",
                    "We've added another line.",
                ),
                Task::new(
                    "cat multiline.txt",
                    "Line 1\nLine 2\nLine 3",
                    "cat shows the full content of our file.",
                ),
                Task::new(
                    "cat multiline.txt | grep \"Line 2\"",
                    "Line 2",
                    "The pipe | sends the output of cat to grep, which searches for a pattern.",
                ),
            ],
            &["|", ">", ">>", "grep"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_clock;

    fn catalog() -> LessonCatalog {
        LessonCatalog::builtin(&fixed_clock())
    }

    #[test]
    fn builtin_keeps_definition_order() {
        let ids: Vec<_> = catalog().lesson_ids().map(LessonId::as_str).map(str::to_owned).collect();
        assert_eq!(ids, vec!["intro", "navigation", "files", "permissions", "pipes"]);
    }

    #[test]
    fn builtin_task_counts() {
        let catalog = catalog();
        assert_eq!(catalog.task_count("intro").unwrap(), 3);
        assert_eq!(catalog.task_count("navigation").unwrap(), 5);
        assert_eq!(catalog.task_count("files").unwrap(), 5);
        assert_eq!(catalog.task_count("permissions").unwrap(), 5);
        assert_eq!(catalog.task_count("pipes").unwrap(), 5);
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.first().id().as_str(), "intro");
    }

    #[test]
    fn get_unknown_is_lookup_error() {
        let err = catalog().get("kernels").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownLesson(ref id) if id == "kernels"));
        assert!(catalog().task_count("").is_err());
    }

    #[test]
    fn get_by_validated_id() {
        let catalog = catalog();
        let id = LessonId::new("files").unwrap();
        assert_eq!(catalog.get(id.as_str()).unwrap().title(), "Working with Files");
        assert_eq!(catalog.position("files").unwrap(), 2);
    }

    #[test]
    fn next_after_walks_definition_order() {
        let catalog = catalog();
        let next = catalog.next_after("intro").unwrap().unwrap();
        assert_eq!(next.id().as_str(), "navigation");
        assert!(catalog.next_after("pipes").unwrap().is_none());
        assert!(catalog.next_after("nope").is_err());
    }

    #[test]
    fn date_output_comes_from_clock() {
        let catalog = catalog();
        let intro = catalog.get("intro").unwrap();
        let date = intro.task(1).unwrap();
        assert_eq!(date.command(), "date");
        assert_eq!(date.output(), fixed_clock().local_timestamp());
    }

    #[test]
    fn from_lessons_rejects_empty_and_duplicates() {
        assert!(matches!(
            LessonCatalog::from_lessons(Vec::new()),
            Err(CatalogError::Empty)
        ));

        let intro = catalog().get("intro").unwrap().clone();
        let err = LessonCatalog::from_lessons(vec![intro.clone(), intro]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateLesson(ref id) if id.as_str() == "intro"));
    }

    #[test]
    fn from_json_builds_ordered_catalog() {
        let raw = r#"{
            "lessons": [
                {
                    "id": "git",
                    "title": "Git Basics",
                    "icon": "command",
                    "content": "Version control.",
                    "hint": "Type git status",
                    "tasks": [
                        {"command": "git status", "output": "nothing to commit", "explanation": "Shows repo state."}
                    ],
                    "commands": ["git"]
                },
                {
                    "id": "vim",
                    "title": "Leaving Vim",
                    "tasks": [
                        {"command": ":q", "output": "", "explanation": "Quits."}
                    ]
                }
            ]
        }"#;
        let catalog = LessonCatalog::from_json(raw).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.first().title(), "Git Basics");
        assert_eq!(catalog.first().icon(), LessonIcon::Command);
        assert_eq!(catalog.get("vim").unwrap().icon(), LessonIcon::Terminal);
    }

    #[test]
    fn from_json_reports_invalid_lessons() {
        let raw = r#"{"lessons": [{"id": "empty", "title": "Empty", "tasks": []}]}"#;
        let err = LessonCatalog::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Lesson { ref id, source: LessonError::NoTasks } if id.as_str() == "empty"
        ));

        assert!(matches!(
            LessonCatalog::from_json("{\"lessons\": 3}"),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(
            LessonCatalog::from_json("{\"lessons\": []}"),
            Err(CatalogError::Empty)
        ));
    }
}
