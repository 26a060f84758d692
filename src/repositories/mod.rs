pub mod assignment_repository;
pub mod feedback_repository;
pub mod invitation_code_repository;
pub mod meeting_repository;
pub mod mentee_repository;
pub mod message_repository;
pub mod points_repository;
pub mod profile_repository;
pub mod progress_repository;
pub mod scheduled_meeting_repository;
pub mod submission_repository;

pub use assignment_repository::AssignmentRepository;
pub use feedback_repository::FeedbackRepository;
pub use invitation_code_repository::InvitationCodeRepository;
pub use meeting_repository::MeetingRepository;
pub use mentee_repository::{MenteeDataUpdate, MenteeRepository, NewMenteeData};
pub use message_repository::MessageRepository;
pub use points_repository::PointsRepository;
pub use profile_repository::{ProfileRepository, ProfileUpdate};
pub use progress_repository::{ProgressRepository, ProgressUpdate};
pub use scheduled_meeting_repository::ScheduledMeetingRepository;
pub use submission_repository::SubmissionRepository;
