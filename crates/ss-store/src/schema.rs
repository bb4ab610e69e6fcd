//! Table declarations
//!
//! Each table names its file, its column order, its primary key and, where it
//! has one, the parent key used for "all rows belonging to X" lookups.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Users,
    Employees,
    Managers,
    Skills,
    Projects,
    Profiles,
    CurrentProjects,
    CaiaUtilization,
    PocUtilization,
}

impl Table {
    pub const ALL: [Table; 9] = [
        Table::Users,
        Table::Employees,
        Table::Managers,
        Table::Skills,
        Table::Projects,
        Table::Profiles,
        Table::CurrentProjects,
        Table::CaiaUtilization,
        Table::PocUtilization,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Employees => "employees",
            Table::Managers => "managers",
            Table::Skills => "skills",
            Table::Projects => "projects",
            Table::Profiles => "profiles",
            Table::CurrentProjects => "currentProjects",
            Table::CaiaUtilization => "caiaUtilization",
            Table::PocUtilization => "pocUtilization",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name())
    }

    /// Singular name used in "not found" messages
    pub fn entity(&self) -> &'static str {
        match self {
            Table::Users => "User",
            Table::Employees => "Employee",
            Table::Managers => "Manager",
            Table::Skills => "Skill",
            Table::Projects => "Project",
            Table::Profiles => "Profile",
            Table::CurrentProjects => "Current project",
            Table::CaiaUtilization => "CAIA utilization",
            Table::PocUtilization => "POC utilization",
        }
    }

    /// Column order on disk
    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            Table::Users => &["id", "name", "password", "role", "team", "subTeam", "managerId"],
            Table::Employees => &[
                "employeeId",
                "name",
                "team",
                "subTeam",
                "managerId",
                "email",
                "totalSkills",
                "totalProjects",
                "specialization",
                "role",
                "location",
                "tLevel",
            ],
            Table::Managers => &[
                "managerId",
                "name",
                "team",
                "subTeam",
                "email",
                "totalSkills",
                "totalProjects",
                "specialization",
            ],
            Table::Skills => &[
                "skillId",
                "skillName",
                "category",
                "employeeId",
                "proficiencyLevel",
                "yearsExperience",
                "certificationStatus",
            ],
            Table::Projects => &[
                "projectId",
                "employeeId",
                "projectName",
                "role",
                "startDate",
                "endDate",
                "status",
                "description",
                "duration",
                "projectManager",
                "accountExecutiveManager",
                "lineManagerPOC",
                "projectOrchestrator",
            ],
            Table::Profiles => &[
                "employeeId",
                "specialization",
                "role",
                "location",
                "tLevel",
                "lastUpdated",
            ],
            Table::CurrentProjects => &[
                "id",
                "employeeId",
                "projectName",
                "task",
                "startDate",
                "endDate",
                "hoursPerDay",
                "createdAt",
                "updatedAt",
            ],
            Table::CaiaUtilization => &[
                "id",
                "employeeId",
                "task",
                "startDate",
                "endDate",
                "hoursPerDay",
                "createdAt",
                "updatedAt",
            ],
            Table::PocUtilization => &[
                "id",
                "employeeId",
                "title",
                "startDate",
                "endDate",
                "hoursPerDay",
                "createdAt",
                "updatedAt",
            ],
        }
    }

    /// Field that identifies a row for update and delete
    pub fn key_field(&self) -> &'static str {
        match self {
            Table::Users => "id",
            Table::Employees | Table::Profiles => "employeeId",
            Table::Managers => "managerId",
            Table::Skills => "skillId",
            Table::Projects => "projectId",
            Table::CurrentProjects | Table::CaiaUtilization | Table::PocUtilization => "id",
        }
    }

    /// Soft reference to the owning record, if any
    pub fn parent_field(&self) -> Option<&'static str> {
        match self {
            Table::Users | Table::Managers => None,
            Table::Employees => Some("managerId"),
            Table::Skills
            | Table::Projects
            | Table::Profiles
            | Table::CurrentProjects
            | Table::CaiaUtilization
            | Table::PocUtilization => Some("employeeId"),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
